mod azure_store;
mod local_store;
mod store_factory;
mod url_signer;

pub use azure_store::AzureBlobStore;
pub use local_store::LocalBlobStore;
pub use store_factory::BlobStoreFactory;
pub use url_signer::{SIGNED_FILES_ROUTE, SignatureError, UrlSigner};
