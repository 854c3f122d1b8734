use thiserror::Error;

/// Failures at the input and serialization boundaries. The numeric engine
/// itself never fails.
#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts() {
        let err: MortgageError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, MortgageError::SerializationError(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = MortgageError::InvalidInput {
            field: "diff_kind".into(),
            reason: "unknown".into(),
        };
        assert_eq!(err.to_string(), "Invalid input: diff_kind: unknown");
    }
}
