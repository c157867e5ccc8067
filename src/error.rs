/// Error types for configuration resolution and the provider API
use thiserror::Error;

/// Errors raised while resolving a rescale request from file, env and flags
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A required value is absent from both the config file and the command line
    #[error("Missing `{key}`: set it in the [{section}] section of the config file or pass --{key}")]
    Missing {
        key: &'static str,
        section: String,
    },

    /// A value is present but cannot be interpreted
    #[error("Invalid value for `{key}`: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// An explicitly requested config file does not exist
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// The config file exists but could not be read or parsed
    #[error("Failed to read config file: {0}")]
    Source(#[from] config::ConfigError),
}

/// Errors surfaced by the Hetzner Cloud API or the transport underneath it
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Connection, TLS or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API error (HTTP {status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The API answered with a success status but a body we could not decode
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),
}

impl ProviderError {
    /// Machine-readable error code for API errors (e.g. `unauthorized`, `not_found`)
    pub fn code(&self) -> Option<&str> {
        match self {
            ProviderError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Top-level error returned by the rescale flow
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Aborted.")]
    Aborted,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_names_key_and_section() {
        let err = ConfigurationError::Missing {
            key: "api_key",
            section: "default".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("api_key"));
        assert!(msg.contains("[default]"));
    }

    #[test]
    fn test_api_error_code() {
        let err = ProviderError::Api {
            status: 401,
            code: "unauthorized".to_string(),
            message: "unable to authenticate".to_string(),
        };
        assert_eq!(err.code(), Some("unauthorized"));
        assert_eq!(ProviderError::Network("timeout".into()).code(), None);
    }

    #[test]
    fn test_top_level_error_is_transparent() {
        let err: Error = ProviderError::Network("connection refused".into()).into();
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
