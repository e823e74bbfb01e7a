use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch(e) => e.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Caller input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("zip_code must be a valid 5-digit US zip code")]
    ZipCode,

    #[error("data_type must be one of: All, Sale, Rental")]
    DataType,

    #[error("history_range must be an integer between 1 and 60")]
    HistoryRange,
}

/// Failure of the market statistics source. The analyzer folds every variant
/// into the error-tagged outcome using the display text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid API key or unauthorized access")]
    Unauthorized,

    #[error("No market data found for zip code {zip_code}")]
    NotFound { zip_code: String },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    Request(String),

    #[error("Network error occurred: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::Unauthorized => StatusCode::UNAUTHORIZED,
            FetchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            FetchError::Request(_) | FetchError::Network(_) | FetchError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// The source answered, but not with the nesting the extractors read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("market payload is not a JSON object")]
    NotAnObject,

    #[error("{section} is not a JSON object")]
    SectionNotAnObject { section: &'static str },

    #[error("{section}.history is not a list")]
    HistoryNotAList { section: &'static str },

    #[error("{section}.history[{index}] is not a JSON object")]
    HistoryEntryNotAnObject { section: &'static str, index: usize },

    #[error("{section}.{field} is not a number")]
    FieldNotANumber {
        section: &'static str,
        field: &'static str,
    },

    #[error("{section}.history[{index}].{field} is not a number")]
    HistoryFieldNotANumber {
        section: &'static str,
        index: usize,
        field: &'static str,
    },
}
