use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot build request url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Cannot encode query: {0}")]
    Query(#[from] serde_qs::Error),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response status {0}")]
    Status(StatusCode),

    #[error("Binance rejected request: {msg} ({code})")]
    Api { code: i64, msg: String },

    #[error("Cannot parse message <{1}>: {0}")]
    SerdeError(serde_json::Error, String),
}
