use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notion API error ({status}, {code}): {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotionError>;
