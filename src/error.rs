use thiserror::Error;

/// Failure while talking to the catalog or shaping its rows.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request could not be sent, or the transport gave up on it.
    #[error("transport error: {0}")]
    Transport(String),

    /// Base endpoint plus path did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Service answered with a non-success status.
    #[error("remote service error: HTTP {status}")]
    RemoteService { status: u16 },

    /// Body was not JSON, or not the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A single record is missing required numeric fields.
    #[error("invalid record: {0}")]
    Validation(String),
}

impl CatalogError {
    /// Short phase label used in log lines.
    pub fn phase(&self) -> &'static str {
        match self {
            CatalogError::Transport(_) | CatalogError::InvalidUrl(_) => "transport",
            CatalogError::RemoteService { .. } => "remote",
            CatalogError::Parse(_) => "parse",
            CatalogError::Validation(_) => "validation",
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_status() {
        let e = CatalogError::RemoteService { status: 503 };
        assert_eq!(e.to_string(), "remote service error: HTTP 503");
        assert_eq!(e.phase(), "remote");
    }

    #[test]
    fn json_errors_become_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e: CatalogError = err.into();
        assert!(matches!(e, CatalogError::Parse(_)));
    }
}
