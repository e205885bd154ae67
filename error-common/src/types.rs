use thiserror::Error;

/// Top-level error for process startup and binary entrypoints
#[derive(Error, Debug)]
pub enum IntakeError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Listener bind or socket failures
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Logging/tracing initialization errors
    #[error("Telemetry error: {0}")]
    TelemetryError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;

/// Log an error with the context it was raised in
pub fn log_error(context: &str, error: &IntakeError) {
    tracing::error!(
        context = context,
        error = %error,
        "Intake error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = IntakeError::NetworkError("address in use".to_string());
        assert_eq!(err.to_string(), "Network error: address in use");
    }

    #[test]
    fn test_anyhow_is_transparent() {
        let err: IntakeError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
