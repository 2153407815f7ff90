//! Unit tests for persistence error types

#[cfg(test)]
mod tests {
    use crate::db::error::DbError;
    use std::error::Error;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{broken").unwrap_err()
    }

    #[test]
    fn test_unavailable_error() {
        let error = DbError::Unavailable("quota exceeded".to_string());
        assert_eq!(error.to_string(), "Storage unavailable: quota exceeded");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_decode_error_display() {
        let error = DbError::DecodeError(json_error());
        assert!(error.to_string().starts_with("Error while decoding stored preferences"));
    }

    #[test]
    fn test_decode_error_has_source() {
        let error = DbError::DecodeError(json_error());
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let error = DbError::Unavailable("read-only".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Unavailable"));
        assert!(debug.contains("read-only"));
    }
}
