use lingua_relay::domain::JobStatus;

#[test]
fn given_pending_status_when_checking_transitions_then_only_processing_is_allowed() {
    assert!(JobStatus::Pending.can_transition_to(JobStatus::Processing));
    assert!(!JobStatus::Pending.can_transition_to(JobStatus::Completed));
    assert!(!JobStatus::Pending.can_transition_to(JobStatus::Failed));
}

#[test]
fn given_processing_status_when_checking_transitions_then_both_terminal_states_are_allowed() {
    assert!(JobStatus::Processing.can_transition_to(JobStatus::Completed));
    assert!(JobStatus::Processing.can_transition_to(JobStatus::Failed));
    assert!(!JobStatus::Processing.can_transition_to(JobStatus::Pending));
}

#[test]
fn given_terminal_status_when_checking_transitions_then_nothing_is_allowed() {
    for terminal in [JobStatus::Completed, JobStatus::Failed] {
        assert!(terminal.is_terminal());
        for next in [
            JobStatus::Pending,
            JobStatus::Processing,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert!(!terminal.can_transition_to(next));
        }
    }
}

#[test]
fn given_legacy_error_label_when_parsing_then_maps_to_failed() {
    assert_eq!("error".parse::<JobStatus>().unwrap(), JobStatus::Failed);
    assert_eq!("COMPLETED".parse::<JobStatus>().unwrap(), JobStatus::Completed);
}

#[test]
fn given_failed_status_when_listing_stored_names_then_includes_legacy_label() {
    assert_eq!(JobStatus::Failed.stored_names(), ["failed", "error"]);
    assert_eq!(JobStatus::Pending.stored_names(), ["pending"]);
    for name in JobStatus::Failed.stored_names() {
        assert_eq!(name.parse::<JobStatus>().unwrap(), JobStatus::Failed);
    }
}

#[test]
fn given_unknown_label_when_parsing_then_returns_error() {
    let result = "queued".parse::<JobStatus>();

    assert_eq!(result.unwrap_err(), "Invalid job status: queued");
}

#[test]
fn given_status_when_displayed_then_uses_lowercase_wire_name() {
    assert_eq!(JobStatus::Processing.to_string(), "processing");
}
