use thiserror::Error;

/// Why an upstream provider refused or mangled a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// HTTP 429 from the provider
    RateLimited,
    /// The endpoint itself does not exist (HTTP 404 on search)
    EndpointNotFound,
    /// Any other non-success status code
    UnexpectedStatus(u16),
    /// The provider answered but the body could not be decoded
    MalformedResponse,
}

/// Errors that can occur while searching for or looking up recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Caller supplied an empty or malformed query or id
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or rejected provider credentials, unknown provider, bad config
    #[error("Configuration error: {0}")]
    ConfigFailure(String),

    /// Timeout, refused connection or no response at all
    #[error("Network error: {0}")]
    TransientNetwork(String),

    /// Provider answered with a status or body we cannot use
    #[error("{message}")]
    UpstreamRejection {
        reason: RejectionReason,
        message: String,
    },

    /// Lookup completed but the provider has no such recipe
    #[error("Recipe not found: {0}")]
    NotFound(String),
}

impl From<config::ConfigError> for RecipeError {
    fn from(err: config::ConfigError) -> Self {
        RecipeError::ConfigFailure(err.to_string())
    }
}

impl RecipeError {
    pub(crate) fn rejected(reason: RejectionReason, message: impl Into<String>) -> Self {
        RecipeError::UpstreamRejection {
            reason,
            message: message.into(),
        }
    }

    /// Whether a caller may reasonably try the same request again later
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RecipeError::TransientNetwork(_) | RecipeError::UpstreamRejection { .. }
        )
    }

    /// Message suitable for showing to an end user instead of the raw error
    pub fn user_message(&self) -> String {
        match self {
            RecipeError::InvalidInput(_) => "Please enter a search term.".to_string(),
            RecipeError::ConfigFailure(msg) => {
                format!("Recipe search is unavailable: {}", msg)
            }
            RecipeError::TransientNetwork(_) => {
                "Could not reach the recipe service. Please try again.".to_string()
            }
            RecipeError::UpstreamRejection {
                reason: RejectionReason::RateLimited,
                ..
            } => "Too many searches right now. Please wait a moment and try again.".to_string(),
            RecipeError::UpstreamRejection { message, .. } => {
                format!("The recipe service returned an error: {}", message)
            }
            RecipeError::NotFound(_) => "No such recipe.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(RecipeError::TransientNetwork("timeout".into()).is_retryable());
        assert!(RecipeError::rejected(RejectionReason::RateLimited, "slow down").is_retryable());
        assert!(!RecipeError::ConfigFailure("no key".into()).is_retryable());
        assert!(!RecipeError::InvalidInput("empty".into()).is_retryable());
        assert!(!RecipeError::NotFound("42".into()).is_retryable());
    }

    #[test]
    fn test_rate_limit_user_message() {
        let err = RecipeError::rejected(
            RejectionReason::RateLimited,
            "API rate limit exceeded - please try again later",
        );
        assert!(err.user_message().contains("Too many searches"));
        assert_eq!(
            err.to_string(),
            "API rate limit exceeded - please try again later"
        );
    }

    #[test]
    fn test_generic_rejection_user_message() {
        let err = RecipeError::rejected(
            RejectionReason::UnexpectedStatus(500),
            "API request failed with status 500",
        );
        assert!(err.user_message().contains("status 500"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: RecipeError = config::ConfigError::Message("bad toml".into()).into();
        assert!(matches!(err, RecipeError::ConfigFailure(ref m) if m.contains("bad toml")));
    }
}
