use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkiffError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to parse page: {0}")]
    Parse(String),

    #[error("No image viewer could open {0}")]
    ExternalViewer(String),

    #[error("Maximum tabs ({0}) reached")]
    TabLimit(usize),

    #[error("{0} is disabled")]
    FeatureDisabled(&'static str),

    #[error("Invalid number {number}. Available: 1-{available}")]
    NoSuchEntry { number: usize, available: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SkiffError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SkiffError::HttpStatus { status, .. } => Some(*status),
            SkiffError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SkiffError>;
