use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;

use crate::domain::StoragePath;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNED_FILES_ROUTE: &str = "/api/v1/files";

/// Issues and verifies expiring download links for blobs served by this
/// process. A link is `{base}/api/v1/files/{path}?expires={unix}&signature={hex}`
/// where the signature is HMAC-SHA256 over `{path}\n{expires}`.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
    base_url: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("link expired")]
    Expired,
    #[error("signature mismatch")]
    Invalid,
}

impl UrlSigner {
    pub fn new(secret: impl Into<Vec<u8>>, base_url: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn sign(&self, path: &StoragePath, ttl: Duration) -> Result<String, url::ParseError> {
        let expires = Utc::now().timestamp() + ttl.as_secs() as i64;
        let signature = hex::encode(self.digest(path.as_str(), expires));

        let mut url = Url::parse(&format!(
            "{}{}/{}",
            self.base_url,
            SIGNED_FILES_ROUTE,
            path.as_str()
        ))?;
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &signature);
        Ok(url.into())
    }

    pub fn verify(
        &self,
        path: &StoragePath,
        expires: i64,
        signature: &str,
    ) -> Result<(), SignatureError> {
        if Utc::now().timestamp() > expires {
            return Err(SignatureError::Expired);
        }

        let provided = hex::decode(signature).map_err(|_| SignatureError::Invalid)?;
        self.mac(path.as_str(), expires)
            .verify_slice(&provided)
            .map_err(|_| SignatureError::Invalid)
    }

    fn digest(&self, path: &str, expires: i64) -> Vec<u8> {
        self.mac(path, expires).finalize().into_bytes().to_vec()
    }

    fn mac(&self, path: &str, expires: i64) -> HmacSha256 {
        // HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("hmac key length is unrestricted"));
        mac.update(path.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        mac
    }
}
