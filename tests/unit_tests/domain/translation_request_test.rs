use bytes::Bytes;

use lingua_relay::domain::{FileKind, InputError, Language, TranslationRequest};

const MAX: u64 = 1024;

#[test]
fn given_valid_input_when_validating_then_returns_request() {
    let request = TranslationRequest::validate(
        "notes.txt",
        Some("text/plain"),
        Bytes::from_static(b"hello"),
        "en",
        "fr",
        MAX,
    )
    .unwrap();

    assert_eq!(request.kind, FileKind::Text);
    assert_eq!(request.source_language, Language::En);
    assert_eq!(request.target_language, Language::Fr);
}

#[test]
fn given_empty_file_when_validating_then_asks_for_a_file() {
    let result =
        TranslationRequest::validate("notes.txt", None, Bytes::new(), "en", "fr", MAX);

    let err = result.unwrap_err();
    assert_eq!(err, InputError::EmptyFile);
    assert_eq!(err.to_string(), "Please select a file");
}

#[test]
fn given_oversized_file_when_validating_then_returns_too_large() {
    let data = Bytes::from(vec![b'a'; 2048]);

    let result = TranslationRequest::validate("notes.txt", None, data, "en", "fr", MAX);

    assert_eq!(
        result.unwrap_err(),
        InputError::FileTooLarge {
            size: 2048,
            max: MAX
        }
    );
}

#[test]
fn given_image_upload_when_validating_then_returns_unsupported_type() {
    let result = TranslationRequest::validate(
        "photo.png",
        Some("image/png"),
        Bytes::from_static(b"\x89PNG"),
        "en",
        "fr",
        MAX,
    );

    assert!(matches!(result, Err(InputError::UnsupportedFileType(_))));
}

#[test]
fn given_unknown_language_when_validating_then_returns_unsupported_language() {
    let result = TranslationRequest::validate(
        "notes.txt",
        None,
        Bytes::from_static(b"hello"),
        "en",
        "klingon",
        MAX,
    );

    assert_eq!(
        result.unwrap_err(),
        InputError::UnsupportedLanguage("klingon".to_string())
    );
}

#[test]
fn given_same_source_and_target_when_validating_then_rejects() {
    let result = TranslationRequest::validate(
        "notes.txt",
        None,
        Bytes::from_static(b"hello"),
        "de",
        "DE",
        MAX,
    );

    assert_eq!(result.unwrap_err(), InputError::SameLanguage(Language::De));
}
