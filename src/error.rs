use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no activity matches the given restrictions")]
    EmptyInput,
    #[error("unknown timeframe \"{0}\" (expected day, week, month or all)")]
    UnknownTimeframe(String),
    #[error("drawing error: {0}")]
    Drawing(String),
    #[error("image encoding error")]
    Image(#[from] image::ImageError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("activity service returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("discord error: {0}")]
    Discord(#[from] serenity::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
