//! Per-step rules deciding whether the user may move on.
//!
//! Nothing here mutates the document or raises errors; an incomplete step
//! simply cannot advance.

use std::collections::HashSet;

use thesis_core::domain::thesis::is_filled;
use thesis_core::{ThesisData, WizardStep};

/// Ideation needs at least this many hypotheses before synthesis.
pub const MIN_HYPOTHESES: usize = 3;

/// Exactly this many hypotheses are carried into business modeling.
pub const SELECTION_SIZE: usize = 3;

pub struct StepRules;

impl StepRules {
    pub fn is_complete(step: WizardStep, thesis: &ThesisData) -> bool {
        match step {
            WizardStep::Activation => {
                is_filled(&thesis.excavation_domain)
                    && is_filled(&thesis.creator_context)
                    && is_filled(&thesis.ambition_level)
            }
            WizardStep::Principles => {
                is_filled(&thesis.domain)
                    && is_filled(&thesis.ai_feedback)
                    && !thesis.truths.is_empty()
            }
            WizardStep::Conventions => {
                !thesis.conventions.is_empty() && thesis.conventions.iter().all(|c| c.is_complete())
            }
            WizardStep::Jtbd => thesis.jtbd.is_complete() && thesis.jtbd_dimensions.is_complete(),
            WizardStep::ProgressForces => thesis.progress_forces.is_complete(),
            WizardStep::Pestel => thesis.pestel_analysis.is_complete(),
            WizardStep::Porter => thesis.porter_five_forces.is_complete(),
            WizardStep::BlueOcean => thesis.blue_ocean_strategy.is_complete(),
            WizardStep::Ideation => thesis.ideation_hypotheses.len() >= MIN_HYPOTHESES,
            WizardStep::Synthesis => Self::selection_is_valid(thesis),
            WizardStep::BusinessModel => Self::business_models_complete(thesis),
            WizardStep::Selection => {
                Self::business_models_complete(thesis)
                    && thesis.has_valid_model_selection()
                    && is_filled(&thesis.final_thesis.justification)
            }
            WizardStep::Summary => thesis.has_valid_model_selection(),
            WizardStep::Manifesto | WizardStep::Generating => false,
        }
    }

    /// Exactly three distinct, in-range hypothesis indices.
    pub fn selection_is_valid(thesis: &ThesisData) -> bool {
        let selected = &thesis.selected_hypotheses;
        let distinct: HashSet<_> = selected.iter().collect();

        selected.len() == SELECTION_SIZE
            && distinct.len() == selected.len()
            && selected
                .iter()
                .all(|&i| i < thesis.ideation_hypotheses.len())
    }

    /// One fully filled business model per selected hypothesis.
    pub fn business_models_complete(thesis: &ThesisData) -> bool {
        !thesis.business_models.is_empty()
            && thesis.business_models_aligned()
            && thesis.business_models.iter().all(|m| m.is_complete())
    }
}
