extern crate serde_json;

use thiserror::Error;

pub mod batch;
pub mod config;
pub mod constants;
pub mod models;
pub mod patch;
pub mod report;
pub mod select;
pub mod store;
pub mod utils;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("[De]serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Store rejected request (HTTP {status}): {body}")]
    StoreStatus { status: u16, body: String },

    #[error("Batch of {0} writes exceeds the store commit limit")]
    BatchTooLarge(usize),

    #[error("Cannot update missing document {collection}/{key}")]
    MissingDocument { collection: String, key: String },

    #[error("Commit failed: {0}")]
    CommitFailed(String),

    #[error("Malformed store response: {0}")]
    MalformedResponse(String),
}
