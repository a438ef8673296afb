mod http_job_client;

pub use http_job_client::HttpJobClient;
