use lingua_relay::domain::{FileKind, JobId, StoragePath};

#[test]
fn given_job_and_filename_when_building_source_path_then_nests_under_job_id() {
    let job_id = JobId::new();

    let path = StoragePath::source(&job_id, "report.pdf", FileKind::Pdf);

    assert_eq!(path.as_str(), format!("{}/report.pdf", job_id));
    assert_eq!(path.file_name(), "report.pdf");
    assert_eq!(path.file_kind(), Some(FileKind::Pdf));
}

#[test]
fn given_filename_without_extension_when_building_source_path_then_appends_kind_extension() {
    let job_id = JobId::new();

    let path = StoragePath::source(&job_id, "report", FileKind::Pdf);

    assert_eq!(path.file_name(), "report.pdf");
    assert_eq!(path.file_kind(), Some(FileKind::Pdf));
}

#[test]
fn given_extension_disagreeing_with_kind_when_building_source_path_then_kind_wins() {
    let job_id = JobId::new();

    let path = StoragePath::source(&job_id, "scan.bin", FileKind::Docx);

    assert_eq!(path.file_name(), "scan.bin.docx");
    assert_eq!(path.file_kind(), Some(FileKind::Docx));
}

#[test]
fn given_job_when_building_translated_path_then_uses_translated_prefix() {
    let job_id = JobId::new();

    let path = StoragePath::translated(&job_id);

    assert_eq!(path.as_str(), format!("translated/{}.txt", job_id));
}

#[test]
fn given_traversal_filename_when_building_source_path_then_keeps_basename_only() {
    let job_id = JobId::new();

    let path = StoragePath::source(&job_id, "../../etc/passwd", FileKind::Text);

    assert_eq!(path.file_name(), "passwd.txt");
    assert!(!path.as_str().contains(".."));
}

#[test]
fn given_filename_with_spaces_and_symbols_when_sanitizing_then_replaces_them() {
    let job_id = JobId::new();

    let path = StoragePath::source(&job_id, "my report (final).docx", FileKind::Docx);

    assert_eq!(path.file_name(), "my_report__final_.docx");
}

#[test]
fn given_hidden_or_empty_filename_when_sanitizing_then_never_yields_empty_name() {
    let job_id = JobId::new();

    assert_eq!(
        StoragePath::source(&job_id, ".env", FileKind::Text).file_name(),
        "env.txt"
    );
    assert_eq!(
        StoragePath::source(&job_id, "", FileKind::Text).file_name(),
        "upload.txt"
    );
}

#[test]
fn given_raw_path_without_extension_when_reading_kind_then_none() {
    assert_eq!(StoragePath::from_raw("abc/report").file_kind(), None);
}
