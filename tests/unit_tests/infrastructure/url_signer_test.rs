use std::time::Duration;

use chrono::Utc;
use url::Url;

use lingua_relay::domain::StoragePath;
use lingua_relay::infrastructure::storage::{SignatureError, UrlSigner};

fn query_params(link: &str) -> (i64, String) {
    let url = Url::parse(link).unwrap();
    let mut expires = None;
    let mut signature = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "expires" => expires = Some(value.parse().unwrap()),
            "signature" => signature = Some(value.into_owned()),
            _ => {}
        }
    }
    (expires.unwrap(), signature.unwrap())
}

#[test]
fn given_signed_link_when_verifying_before_expiry_then_accepts() {
    let signer = UrlSigner::new("secret", "http://localhost:3000/");
    let path = StoragePath::from_raw("translated/abc.txt");

    let link = signer.sign(&path, Duration::from_secs(60)).unwrap();
    let (expires, signature) = query_params(&link);

    assert!(link.starts_with("http://localhost:3000/api/v1/files/translated/abc.txt?"));
    assert!(expires > Utc::now().timestamp());
    assert_eq!(signer.verify(&path, expires, &signature), Ok(()));
}

#[test]
fn given_signed_link_when_path_is_swapped_then_rejects() {
    let signer = UrlSigner::new("secret", "http://localhost:3000");
    let path = StoragePath::from_raw("translated/abc.txt");
    let (expires, signature) = query_params(&signer.sign(&path, Duration::from_secs(60)).unwrap());

    let other = StoragePath::from_raw("translated/other.txt");

    assert_eq!(
        signer.verify(&other, expires, &signature),
        Err(SignatureError::Invalid)
    );
}

#[test]
fn given_signed_link_when_expiry_is_extended_then_rejects() {
    let signer = UrlSigner::new("secret", "http://localhost:3000");
    let path = StoragePath::from_raw("translated/abc.txt");
    let (expires, signature) = query_params(&signer.sign(&path, Duration::from_secs(60)).unwrap());

    assert_eq!(
        signer.verify(&path, expires + 3600, &signature),
        Err(SignatureError::Invalid)
    );
}

#[test]
fn given_link_signed_with_other_secret_when_verifying_then_rejects() {
    let path = StoragePath::from_raw("translated/abc.txt");
    let (expires, signature) = query_params(
        &UrlSigner::new("one", "http://localhost")
            .sign(&path, Duration::from_secs(60))
            .unwrap(),
    );

    let result = UrlSigner::new("two", "http://localhost").verify(&path, expires, &signature);

    assert_eq!(result, Err(SignatureError::Invalid));
}

#[test]
fn given_past_expiry_when_verifying_then_reports_expired() {
    let signer = UrlSigner::new("secret", "http://localhost:3000");
    let path = StoragePath::from_raw("translated/abc.txt");

    let result = signer.verify(&path, Utc::now().timestamp() - 1, "00");

    assert_eq!(result, Err(SignatureError::Expired));
}

#[test]
fn given_non_hex_signature_when_verifying_then_rejects() {
    let signer = UrlSigner::new("secret", "http://localhost:3000");
    let path = StoragePath::from_raw("translated/abc.txt");

    let result = signer.verify(&path, Utc::now().timestamp() + 60, "not-hex");

    assert_eq!(result, Err(SignatureError::Invalid));
}
