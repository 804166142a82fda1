#[derive(Debug, thiserror::Error)]
pub enum DnsrankError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = DnsrankError::Validation("meanMs must be non-negative".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: meanMs must be non-negative"
        );
    }

    #[test]
    fn serde_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not valid json").unwrap_err();
        let err: DnsrankError = json_err.into();
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn error_is_debug() {
        let err = DnsrankError::Validation("test".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("Validation"));
    }
}
