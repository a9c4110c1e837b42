use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a stats run.
///
/// Anything returned before the snapshot is written leaves the data directory untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("malformed stats response: {0}")]
    MalformedResponse(String),

    #[error("whitelist {path}: {message}")]
    Whitelist { path: PathBuf, message: String },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("config: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
