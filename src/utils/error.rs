use crate::domain::model::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlyoverError {
    #[error("Request failed while fetching {stage}: {source}")]
    NetworkError {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("Status Code {status} when fetching {stage}. Response: {body}")]
    ServerError {
        stage: Stage,
        status: u16,
        body: String,
    },

    #[error("{stage} not found")]
    NotFoundError { stage: Stage },

    #[error("Malformed response when fetching {stage}: {message}")]
    ParseError { stage: Stage, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlyoverError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    NotFound,
    Parse,
    Validation,
    Config,
    Serialization,
}

impl FlyoverError {
    /// The pipeline stage that produced this error, if it came from one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::NetworkError { stage, .. }
            | Self::ServerError { stage, .. }
            | Self::NotFoundError { stage }
            | Self::ParseError { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkError { .. } => ErrorCategory::Network,
            Self::ServerError { .. } => ErrorCategory::Server,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::ParseError { .. } => ErrorCategory::Parse,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ConfigError { .. } | Self::IoError(_) => ErrorCategory::Config,
            Self::SerializationError(_) => ErrorCategory::Serialization,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NetworkError { stage, .. } => {
                format!("Could not reach the {} service", stage)
            }
            Self::ServerError { stage, status, .. } => {
                format!("The {} service answered with status {}", stage, status)
            }
            Self::NotFoundError { stage } => {
                format!("The {} service returned no data", stage)
            }
            Self::ParseError { stage, .. } => {
                format!("The {} service returned an unexpected response", stage)
            }
            Self::ValidationError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::ConfigError { .. } | Self::IoError(_) => {
                "The configuration file could not be loaded".to_string()
            }
            Self::SerializationError(_) => "The report could not be rendered as JSON".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and try again",
            ErrorCategory::Server => "The remote service may be down; try again later",
            ErrorCategory::NotFound => "The service had nothing for this lookup; try again later",
            ErrorCategory::Parse => "The service API may have changed; check the configured endpoints",
            ErrorCategory::Validation => "Fix the offending value and run again",
            ErrorCategory::Config => "Check the path and TOML syntax of the configuration file",
            ErrorCategory::Serialization => "Run again without --json to get the plain listing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_is_reported_for_stage_errors() {
        let err = FlyoverError::NotFoundError {
            stage: Stage::Geolocation,
        };
        assert_eq!(err.stage(), Some(Stage::Geolocation));
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = FlyoverError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(err.stage(), None);
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_server_error_message_includes_status_and_body() {
        let err = FlyoverError::ServerError {
            stage: Stage::IpLookup,
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Status Code 503 when fetching IP address. Response: unavailable"
        );
        assert_eq!(
            err.user_friendly_message(),
            "The IP address service answered with status 503"
        );
    }

    #[test]
    fn test_json_error_is_serialization_category() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FlyoverError = json_err.into();
        assert_eq!(err.category(), ErrorCategory::Serialization);
        assert_eq!(err.stage(), None);
        assert!(err.to_string().starts_with("Serialization error:"));
        assert_eq!(
            err.recovery_suggestion(),
            "Run again without --json to get the plain listing"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FlyoverError = io.into();
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.to_string().contains("missing"));
    }
}
