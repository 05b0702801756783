use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown wizard step: {0}")]
    UnknownStep(String),

    #[error("Unknown thesis field: {0}")]
    UnknownField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CoreError::UnknownStep("phase9".to_string());
        assert!(error.to_string().contains("phase9"));
    }
}
