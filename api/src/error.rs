use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures that end a single call. Missing or malformed upstream fields are
/// not errors; adapters substitute defaults for those.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("parse error for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("upstream rejected request: {message}")]
    Upstream { message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Request never produced a usable response (network, status, rejection).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Network { .. } | ApiError::Status { .. } | ApiError::Upstream { .. }
        )
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ApiError::Parse { .. })
    }
}
