use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to a weather/geocoding provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(
        "Location not found. Please check the spelling and try again. \
         For US cities, try format like 'Miami, FL' or 'Miami, Florida'."
    )]
    NotFound,

    #[error("Weather service is temporarily unavailable. Please try again later.")]
    Unavailable(StatusCode),

    #[error("Weather service error: {}", .0.as_u16())]
    Status(StatusCode, String),

    #[error("Failed to reach weather service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {what} response: {reason}")]
    InvalidResponse { what: &'static str, reason: String },
}

impl ProviderError {
    /// Map a non-success HTTP status to the error the page shows.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::NOT_FOUND {
            Self::NotFound
        } else if status.is_server_error() {
            Self::Unavailable(status)
        } else {
            Self::Status(status, truncate_body(body))
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
