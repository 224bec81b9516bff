use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Page size must be a positive number")]
    InvalidPageSize,

    #[error("Please enter a valid date")]
    InvalidDate,

    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    #[error("Inventory must be a whole number")]
    InvalidInventory,

    #[error("Unknown product type {0}")]
    UnknownProductType(String),
}

/// Failure of a dispatched operation, from the transport or the server
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server responded with HTTP status {0}")]
    Status(u16),

    #[error("Server reported errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    #[error("Response could not be decoded: {0}")]
    Decode(String),

    #[error("Response carried no data")]
    MissingData,
}

/// Why a submission did not produce results
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    #[error("{notice}")]
    Failed {
        notice: String,
        #[source]
        source: Fault,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while assembling the client configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid endpoint {value}: {source}")]
    Endpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid timeout {0}, expected milliseconds")]
    Timeout(String),

    #[cfg(feature = "reqwest")]
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::InvalidPageSize.to_string(),
            "Page size must be a positive number"
        );
        assert_eq!(ValidationError::InvalidDate.to_string(), "Please enter a valid date");
        assert_eq!(
            ValidationError::MissingField("name").to_string(),
            "Please fill in the name field"
        );
    }

    #[test]
    fn test_invalid_joins_every_message() {
        let error = SubmitError::Invalid(vec![
            ValidationError::InvalidDate,
            ValidationError::InvalidPageSize,
        ]);
        assert_eq!(
            error.to_string(),
            "Please enter a valid date; Page size must be a positive number"
        );
    }

    #[test]
    fn test_failed_displays_notice_and_keeps_source() {
        let error = SubmitError::Failed {
            notice: "Encountered error executing the findOffersForDate query".to_string(),
            source: Fault::Status(500),
        };
        assert_eq!(
            error.to_string(),
            "Encountered error executing the findOffersForDate query"
        );
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Server responded with HTTP status 500"));
    }

    #[test]
    fn test_graphql_fault_lists_messages() {
        let fault = Fault::GraphQL(vec!["first".into(), "second".into()]);
        assert_eq!(fault.to_string(), "Server reported errors: first; second");
    }
}
