mod job_controller;
mod job_poller;
mod repository_job_feed;
mod submission_service;
mod translation_dispatcher;

pub use job_controller::{ControllerError, JobController, JobFailure, ProcessOutcome};
pub use job_poller::{
    CONNECTION_LOST_MESSAGE, DETAILS_FAILURE_MESSAGE, GENERIC_FAILURE_MESSAGE, JobPoller,
    NOT_FOUND_MESSAGE, PollerConfig, PollerError, PollerState, SUBMIT_FAILURE_MESSAGE,
    TIMED_OUT_MESSAGE,
};
pub use repository_job_feed::RepositoryJobFeed;
pub use submission_service::{SubmissionError, SubmissionService};
pub use translation_dispatcher::TranslationDispatcher;
