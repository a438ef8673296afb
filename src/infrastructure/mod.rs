pub mod http;
pub mod observability;
pub mod persistence;
pub mod storage;
pub mod text_processing;
pub mod translation;
