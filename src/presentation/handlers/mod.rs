mod create_translation;
mod download;
mod health;
mod languages;
mod signed_file;
mod translation_status;
pub mod translation_types;
mod trigger_translation;

pub use create_translation::create_translation_handler;
pub use download::download_handler;
pub use health::health_handler;
pub use languages::languages_handler;
pub use signed_file::signed_file_handler;
pub use translation_status::translation_status_handler;
pub use trigger_translation::trigger_translation_handler;
