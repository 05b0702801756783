use thesis_core::ThesisData;
use tracing::{error, info, warn};

use crate::error::{Result, WizardError};
use crate::oracle::{GeneratedThesis, GenerationRequest, ThesisOracle};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Structural checks a generated document must pass before it replaces the
/// user's: at least one business model and a selected index inside the list.
pub fn validate_generated(thesis: &ThesisData) -> Result<()> {
    if thesis.business_models.is_empty() {
        return Err(WizardError::InvalidThesis(
            "businessModels is missing or empty".to_string(),
        ));
    }

    match thesis.final_thesis.selected_model_index {
        None => Err(WizardError::InvalidThesis(
            "finalThesis.selectedModelIndex is missing".to_string(),
        )),
        Some(index) if index >= thesis.business_models.len() => {
            Err(WizardError::InvalidThesis(format!(
                "finalThesis.selectedModelIndex {} is out of bounds for {} business models",
                index,
                thesis.business_models.len()
            )))
        }
        Some(_) => Ok(()),
    }
}

pub struct ThesisGenerator;

impl ThesisGenerator {
    /// Ask the oracle for a thesis until one validates, giving up after
    /// `max_attempts` calls. Transport failures and invalid documents both
    /// consume an attempt.
    pub async fn generate(
        oracle: &dyn ThesisOracle,
        request: &GenerationRequest,
        max_attempts: u32,
    ) -> Result<GeneratedThesis> {
        let max_attempts = max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            info!(
                oracle = oracle.name(),
                attempt, max_attempts, "Generating thesis"
            );

            let outcome = oracle
                .generate_thesis(request)
                .await
                .and_then(|generated| validate_generated(&generated.thesis).map(|_| generated));

            match outcome {
                Ok(generated) => {
                    info!(attempt, "Generated thesis accepted");
                    return Ok(generated);
                }
                Err(e) => {
                    let transient = matches!(&e, WizardError::GenAi(inner) if inner.is_transient());
                    warn!(
                        attempt,
                        max_attempts,
                        transient,
                        error = %e,
                        "Thesis generation attempt failed"
                    );
                    last_error = e.to_string();
                }
            }
        }

        error!(attempts = max_attempts, "All thesis generation attempts failed");
        Err(WizardError::GenerationFailed {
            attempts: max_attempts,
            reason: last_error,
        })
    }
}
