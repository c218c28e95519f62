use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid backend URL '{0}': only http and https are supported")]
    InvalidBaseUrl(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("PanelError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for PanelError {
    fn from(error: std::io::Error) -> Self {
        PanelError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for PanelError {
    fn from(error: reqwest::Error) -> Self {
        PanelError::Reqwest(Box::new(error))
    }
}
