use serde::{Deserialize, Serialize};

use crate::sources::ApiSource;

/// Categorical tag for a [`SourceError`], independent of which adapter failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Transport,
    MalformedPayload,
    Configuration,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Pokémon not found: {name}")]
    NotFound { origin: ApiSource, name: String },
    #[error("{message}")]
    Transport { origin: ApiSource, message: String },
    #[error("Malformed payload: {message}")]
    MalformedPayload { origin: ApiSource, message: String },
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error shape handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub code: String,
    pub kind: ErrorKind,
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::NotFound { .. } => ErrorKind::NotFound,
            SourceError::Transport { .. } => ErrorKind::Transport,
            SourceError::MalformedPayload { .. } => ErrorKind::MalformedPayload,
            SourceError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// The source that raised the error, if any.
    pub fn origin(&self) -> Option<ApiSource> {
        match self {
            SourceError::NotFound { origin, .. }
            | SourceError::Transport { origin, .. }
            | SourceError::MalformedPayload { origin, .. } => Some(*origin),
            SourceError::Configuration(_) => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.origin() {
            Some(origin) => origin.error_code(),
            None => "CONFIGURATION_ERROR",
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError {
            message: self.to_string(),
            code: self.code().to_string(),
            kind: self.kind(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Server error: {0}")]
    Server(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_name_the_owning_adapter() {
        let local = SourceError::NotFound {
            origin: ApiSource::Custom,
            name: "missingno".to_string(),
        };
        let remote = SourceError::Transport {
            origin: ApiSource::PokeApi,
            message: "connection refused".to_string(),
        };
        assert_eq!(local.code(), "CUSTOM_API_ERROR");
        assert_eq!(remote.code(), "POKEAPI_ERROR");
        assert_eq!(
            SourceError::Configuration("bad".to_string()).code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_api_error_carries_message_and_kind() {
        let err = SourceError::NotFound {
            origin: ApiSource::Custom,
            name: "missingno".to_string(),
        };
        let api = err.to_api_error();
        assert_eq!(api.kind, ErrorKind::NotFound);
        assert_eq!(api.message, "Pokémon not found: missingno");
        assert_eq!(api.code, "CUSTOM_API_ERROR");
    }

    #[test]
    fn test_source_error_becomes_startup_config_error() {
        let err = AppError::from(SourceError::Configuration("cannot build HTTP client".to_string()));
        assert!(matches!(err, AppError::Config(msg) if msg.contains("cannot build HTTP client")));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::MalformedPayload).unwrap();
        assert_eq!(json, r#""malformed_payload""#);
    }
}
