use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_becomes_decode() {
        let err = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let fetch_err: FetchError = err.into();
        assert!(matches!(fetch_err, FetchError::Decode(_)));
        assert!(fetch_err.to_string().starts_with("Parse error: "));
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            FetchError::Transport("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            FetchError::Config("empty base url".into()).to_string(),
            "Configuration error: empty base url"
        );
    }
}
