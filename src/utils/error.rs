use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid API response: {message}")]
    InvalidResponse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input stream closed")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Api,
    Storage,
    Input,
}

impl CliError {
    pub fn missing_token() -> Self {
        CliError::Configuration {
            message: "API token not configured. Run `cloudflare-cli --configure` or set CLOUDFLARE_API_TOKEN".to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::Configuration { .. } => ErrorCategory::Configuration,
            CliError::Transport(_) => ErrorCategory::Network,
            CliError::InvalidResponse { .. } => ErrorCategory::Api,
            CliError::Io(_) | CliError::Serialization(_) => ErrorCategory::Storage,
            CliError::InvalidInput { .. } | CliError::InputClosed => ErrorCategory::Input,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Provide a token via CLOUDFLARE_API_TOKEN, ~/.cloudflare-cli/config.json or a local .env file"
            }
            ErrorCategory::Network => "Check your network connection and the configured API base URL",
            ErrorCategory::Api => "Verify the API base URL points at the Cloudflare v4 API",
            ErrorCategory::Storage => "Check permissions on ~/.cloudflare-cli",
            ErrorCategory::Input => "Re-enter the value",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CliError::Configuration { message } => message.clone(),
            CliError::Transport(e) if e.is_timeout() => "The request to Cloudflare timed out".to_string(),
            CliError::Transport(e) if e.is_connect() => {
                "Could not connect to the Cloudflare API".to_string()
            }
            CliError::Transport(e) => format!("Request to Cloudflare failed: {}", e),
            CliError::InvalidResponse { message } => {
                format!("Cloudflare returned an unreadable response: {}", message)
            }
            CliError::InvalidInput { field, reason, .. } => format!("{}: {}", field, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_configuration_error() {
        let err = CliError::missing_token();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("API token not configured"));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = CliError::InvalidInput {
            field: "api_base".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.user_friendly_message(), "api_base: Unsupported URL scheme: ftp");
    }
}
