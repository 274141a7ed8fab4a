use thiserror::Error;

/// Main error type for strutscan operations
#[derive(Error, Debug)]
pub enum StrutscanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot decode {path}: neither UTF-8 nor GBK")]
    Decode { path: String },

    #[error("Malformed routing config {path}: {message}")]
    RouteConfig { path: String, message: String },

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, StrutscanError>;
