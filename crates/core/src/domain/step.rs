use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of a wizard step.
///
/// `Generating` is a pseudo-step entered only while the generation service is
/// running; it is not part of the manual sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Activation,
    Generating,
    Principles,
    Conventions,
    Jtbd,
    ProgressForces,
    Pestel,
    Porter,
    BlueOcean,
    Ideation,
    Synthesis,
    BusinessModel,
    Selection,
    Summary,
    Manifesto,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "activation",
            Self::Generating => "generating",
            Self::Principles => "principles",
            Self::Conventions => "conventions",
            Self::Jtbd => "jtbd",
            Self::ProgressForces => "progress_forces",
            Self::Pestel => "pestel",
            Self::Porter => "porter",
            Self::BlueOcean => "blue_ocean",
            Self::Ideation => "ideation",
            Self::Synthesis => "synthesis",
            Self::BusinessModel => "business_model",
            Self::Selection => "selection",
            Self::Summary => "summary",
            Self::Manifesto => "manifesto",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Heading shown above the step's form.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Activation => "Phase 0: Activation",
            Self::Generating => "Generating thesis",
            Self::Principles => "Phase 1: First Principles",
            Self::Conventions => "Phase 1.1: Challenge Conventions",
            Self::Jtbd => "Phase 1.2: Jobs To Be Done",
            Self::ProgressForces => "Phase 1.3: Forces of Progress",
            Self::Pestel => "Phase 2: PESTEL Analysis",
            Self::Porter => "Phase 2.1: Porter's Five Forces",
            Self::BlueOcean => "Phase 2.2: Blue Ocean Strategy",
            Self::Ideation => "Phase 3: Expansive Ideation",
            Self::Synthesis => "Phase 3.1: Synthesis & Selection",
            Self::BusinessModel => "Phase 4: Business Modeling",
            Self::Selection => "Phase 5: Final Selection",
            Self::Summary => "Your Final Thesis",
            Self::Manifesto => "Your Manifesto Blueprint",
        }
    }
}

impl FromStr for WizardStep {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let step = match s.trim().to_lowercase().as_str() {
            "activation" => Self::Activation,
            "generating" => Self::Generating,
            "principles" => Self::Principles,
            "conventions" => Self::Conventions,
            "jtbd" => Self::Jtbd,
            "progress_forces" => Self::ProgressForces,
            "pestel" => Self::Pestel,
            "porter" => Self::Porter,
            "blue_ocean" => Self::BlueOcean,
            "ideation" => Self::Ideation,
            "synthesis" => Self::Synthesis,
            "business_model" => Self::BusinessModel,
            "selection" => Self::Selection,
            "summary" => Self::Summary,
            "manifesto" => Self::Manifesto,
            _ => return Err(CoreError::UnknownStep(s.to_string())),
        };
        Ok(step)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names() {
        assert_eq!(WizardStep::Activation.as_str(), "activation");
        assert_eq!(WizardStep::BlueOcean.as_str(), "blue_ocean");
        assert_eq!(WizardStep::BusinessModel.to_string(), "business_model");
    }

    #[test]
    fn test_step_parsing() {
        assert_eq!(WizardStep::parse("pestel"), Some(WizardStep::Pestel));
        assert_eq!(WizardStep::parse("PORTER"), Some(WizardStep::Porter));
        assert_eq!(WizardStep::parse("phase9"), None);
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        let err = "intro".parse::<WizardStep>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownStep(ref name) if name == "intro"));
        assert_eq!(err.to_string(), "Unknown wizard step: intro");
        assert_eq!(" summary ".parse::<WizardStep>().unwrap(), WizardStep::Summary);
    }
}
