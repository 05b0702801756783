//! Builders for whole-field replacement values.
//!
//! Each function reads the current document and returns the
//! [`ThesisUpdate`] a step hands to the store. The document itself is never
//! touched here.

use thesis_core::{BusinessModel, Convention, IdeationHypothesis, ThesisData, ThesisUpdate};

use crate::completeness::SELECTION_SIZE;

/// Split a multi-line answer into list entries, dropping blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Set the human need. A changed need invalidates the previous coaching
/// feedback, so both fields are replaced.
pub fn set_human_need(thesis: &ThesisData, need: impl Into<String>) -> Vec<ThesisUpdate> {
    let need = need.into();
    if need == thesis.human_need {
        return Vec::new();
    }
    vec![
        ThesisUpdate::HumanNeed(need),
        ThesisUpdate::AiFeedback(String::new()),
    ]
}

/// The conventions list with one empty pair appended.
pub fn add_convention(thesis: &ThesisData) -> ThesisUpdate {
    let mut conventions = thesis.conventions.clone();
    conventions.push(Convention::default());
    ThesisUpdate::Conventions(conventions)
}

/// The conventions list without the entry at `index`. The last remaining
/// pair cannot be removed, and out-of-range indices are rejected.
pub fn remove_convention(thesis: &ThesisData, index: usize) -> Option<ThesisUpdate> {
    if thesis.conventions.len() <= 1 || index >= thesis.conventions.len() {
        return None;
    }
    let mut conventions = thesis.conventions.clone();
    conventions.remove(index);
    Some(ThesisUpdate::Conventions(conventions))
}

/// Append a hypothesis; blank ideas are ignored.
pub fn add_hypothesis(
    thesis: &ThesisData,
    source: impl Into<String>,
    idea: &str,
) -> Option<ThesisUpdate> {
    let idea = idea.trim();
    if idea.is_empty() {
        return None;
    }

    let mut hypotheses = thesis.ideation_hypotheses.clone();
    hypotheses.push(IdeationHypothesis::new(source, idea));
    Some(ThesisUpdate::IdeationHypotheses(hypotheses))
}

/// Deselect `index` if it is selected, otherwise select it while fewer than
/// three are picked. Out-of-range indices leave the selection unchanged.
pub fn toggle_hypothesis(thesis: &ThesisData, index: usize) -> ThesisUpdate {
    let mut selection = thesis.selected_hypotheses.clone();

    if let Some(pos) = selection.iter().position(|&i| i == index) {
        selection.remove(pos);
    } else if selection.len() < SELECTION_SIZE && index < thesis.ideation_hypotheses.len() {
        selection.push(index);
    }

    ThesisUpdate::SelectedHypotheses(selection)
}

/// Fresh business models, one per selected hypothesis, when the list has
/// drifted out of alignment with the selection. `None` when already aligned.
pub fn align_business_models(thesis: &ThesisData) -> Option<ThesisUpdate> {
    if thesis.business_models_aligned() {
        return None;
    }
    let models = vec![BusinessModel::default(); thesis.selected_hypotheses.len()];
    Some(ThesisUpdate::BusinessModels(models))
}

/// Replace the business model at `index`.
pub fn set_business_model(
    thesis: &ThesisData,
    index: usize,
    model: BusinessModel,
) -> Option<ThesisUpdate> {
    let mut models = thesis.business_models.clone();
    let slot = models.get_mut(index)?;
    *slot = model;
    Some(ThesisUpdate::BusinessModels(models))
}

/// Choose the final business model; out-of-range indices are rejected.
pub fn select_model(thesis: &ThesisData, index: usize) -> Option<ThesisUpdate> {
    if index >= thesis.business_models.len() {
        return None;
    }
    let mut final_thesis = thesis.final_thesis.clone();
    final_thesis.selected_model_index = Some(index);
    Some(ThesisUpdate::FinalThesis(final_thesis))
}

pub fn set_justification(thesis: &ThesisData, justification: impl Into<String>) -> ThesisUpdate {
    let mut final_thesis = thesis.final_thesis.clone();
    final_thesis.justification = justification.into();
    ThesisUpdate::FinalThesis(final_thesis)
}
