use thesis_core::WizardStep;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Invalid step transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Step {0} is not complete yet")]
    IncompleteStep(WizardStep),

    #[error("Generated thesis rejected: {0}")]
    InvalidThesis(String),

    #[error("Failed to generate a valid thesis after {attempts} attempts: {reason}")]
    GenerationFailed { attempts: u32, reason: String },

    #[error("Chat API error: {0}")]
    GenAi(#[from] genai::GenAiError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WizardError {
    pub fn invalid_transition(from: WizardStep, to: WizardStep) -> Self {
        Self::InvalidTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = WizardError::invalid_transition(WizardStep::Pestel, WizardStep::Manifesto);
        assert_eq!(
            error.to_string(),
            "Invalid step transition from pestel to manifesto"
        );

        let error = WizardError::IncompleteStep(WizardStep::Jtbd);
        assert!(error.to_string().contains("jtbd"));
    }
}
