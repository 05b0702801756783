use thesis_core::WizardStep;

use crate::error::{Result, WizardError};

/// Fixed linear order of the manual questionnaire.
///
/// `advance` and `retreat` are index lookups into [`StepSequencer::SEQUENCE`];
/// steps outside the table (the `Generating` pseudo-step) and the two ends of
/// the table map to themselves.
pub struct StepSequencer;

impl StepSequencer {
    pub const SEQUENCE: [WizardStep; 14] = [
        WizardStep::Activation,
        WizardStep::Principles,
        WizardStep::Conventions,
        WizardStep::Jtbd,
        WizardStep::ProgressForces,
        WizardStep::Pestel,
        WizardStep::Porter,
        WizardStep::BlueOcean,
        WizardStep::Ideation,
        WizardStep::Synthesis,
        WizardStep::BusinessModel,
        WizardStep::Selection,
        WizardStep::Summary,
        WizardStep::Manifesto,
    ];

    pub fn initial() -> WizardStep {
        Self::SEQUENCE[0]
    }

    pub fn terminal() -> WizardStep {
        Self::SEQUENCE[Self::SEQUENCE.len() - 1]
    }

    fn index_of(step: WizardStep) -> Option<usize> {
        Self::SEQUENCE.iter().position(|s| *s == step)
    }

    pub fn advance(current: WizardStep) -> WizardStep {
        Self::index_of(current)
            .and_then(|i| Self::SEQUENCE.get(i + 1))
            .copied()
            .unwrap_or(current)
    }

    pub fn retreat(current: WizardStep) -> WizardStep {
        Self::index_of(current)
            .and_then(|i| i.checked_sub(1))
            .map(|i| Self::SEQUENCE[i])
            .unwrap_or(current)
    }

    pub fn is_initial(step: WizardStep) -> bool {
        step == Self::initial()
    }

    pub fn is_terminal(step: WizardStep) -> bool {
        step == Self::terminal()
    }

    /// 1-based position and total length, for progress display.
    pub fn position(step: WizardStep) -> Option<(usize, usize)> {
        Self::index_of(step).map(|i| (i + 1, Self::SEQUENCE.len()))
    }

    pub fn validate_transition(from: WizardStep, to: WizardStep) -> Result<()> {
        if Self::allowed_transitions(from).contains(&to) {
            Ok(())
        } else {
            Err(WizardError::invalid_transition(from, to))
        }
    }

    pub fn can_transition(from: WizardStep, to: WizardStep) -> bool {
        Self::validate_transition(from, to).is_ok()
    }

    fn allowed_transitions(from: WizardStep) -> Vec<WizardStep> {
        match from {
            WizardStep::Activation => vec![WizardStep::Principles, WizardStep::Generating],
            // Generation either lands on the summary or returns to the seeds.
            WizardStep::Generating => vec![WizardStep::Summary, WizardStep::Activation],
            step => {
                let mut allowed = vec![Self::advance(step), Self::retreat(step)];
                // Reset is always available.
                allowed.push(Self::initial());
                allowed.retain(|s| *s != step);
                allowed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_follows_sequence() {
        assert_eq!(
            StepSequencer::advance(WizardStep::Activation),
            WizardStep::Principles
        );
        assert_eq!(
            StepSequencer::advance(WizardStep::BlueOcean),
            WizardStep::Ideation
        );
        assert_eq!(
            StepSequencer::advance(WizardStep::BusinessModel),
            WizardStep::Selection
        );
        assert_eq!(
            StepSequencer::advance(WizardStep::Summary),
            WizardStep::Manifesto
        );
    }

    #[test]
    fn test_boundaries_are_fixed_points() {
        assert_eq!(
            StepSequencer::advance(WizardStep::Manifesto),
            WizardStep::Manifesto
        );
        assert_eq!(
            StepSequencer::retreat(WizardStep::Activation),
            WizardStep::Activation
        );
        assert_eq!(
            StepSequencer::advance(WizardStep::Generating),
            WizardStep::Generating
        );
        assert_eq!(
            StepSequencer::retreat(WizardStep::Generating),
            WizardStep::Generating
        );
    }

    #[test]
    fn test_advance_and_retreat_are_inverses() {
        for step in StepSequencer::SEQUENCE {
            if !StepSequencer::is_terminal(step) {
                assert_eq!(
                    StepSequencer::retreat(StepSequencer::advance(step)),
                    step
                );
            }
            if !StepSequencer::is_initial(step) {
                assert_eq!(
                    StepSequencer::advance(StepSequencer::retreat(step)),
                    step
                );
            }
        }
    }

    #[test]
    fn test_sequence_visits_every_manual_step_once() {
        let mut step = StepSequencer::initial();
        let mut visited = vec![step];
        while !StepSequencer::is_terminal(step) {
            step = StepSequencer::advance(step);
            visited.push(step);
        }
        assert_eq!(visited, StepSequencer::SEQUENCE.to_vec());
        assert!(!visited.contains(&WizardStep::Generating));
    }

    #[test]
    fn test_position() {
        assert_eq!(StepSequencer::position(WizardStep::Activation), Some((1, 14)));
        assert_eq!(StepSequencer::position(WizardStep::Manifesto), Some((14, 14)));
        assert_eq!(StepSequencer::position(WizardStep::Generating), None);
    }

    #[test]
    fn test_valid_transitions() {
        assert!(StepSequencer::can_transition(
            WizardStep::Activation,
            WizardStep::Generating
        ));
        assert!(StepSequencer::can_transition(
            WizardStep::Generating,
            WizardStep::Summary
        ));
        assert!(StepSequencer::can_transition(
            WizardStep::Pestel,
            WizardStep::ProgressForces
        ));
        assert!(StepSequencer::can_transition(
            WizardStep::Manifesto,
            WizardStep::Activation
        ));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!StepSequencer::can_transition(
            WizardStep::Principles,
            WizardStep::Generating
        ));
        assert!(!StepSequencer::can_transition(
            WizardStep::Generating,
            WizardStep::Principles
        ));
        assert!(!StepSequencer::can_transition(
            WizardStep::Jtbd,
            WizardStep::Manifesto
        ));
        assert!(!StepSequencer::can_transition(
            WizardStep::Manifesto,
            WizardStep::Manifesto
        ));
    }
}
