use std::fmt::Write;

use thesis_core::domain::thesis::is_filled;
use thesis_core::ThesisData;

/// Shown in place of the summary when there is nothing selected to summarize.
pub const SUMMARY_UNAVAILABLE: &str = "No business model has been selected yet.";

/// Stands in for a selected model's hypothesis that is not in the document.
pub const HYPOTHESIS_PLACEHOLDER: &str = "[Hypothesis not recorded]";

/// The thesis statement: the one written by the user or the generator, else
/// one assembled from the leading convention.
pub fn thesis_statement(thesis: &ThesisData) -> String {
    let written = &thesis.final_thesis.product_manifesto.thesis_statement;
    if is_filled(written) {
        return written.clone();
    }

    let (convention, counter) = thesis
        .conventions
        .first()
        .map(|c| (c.statement.as_str(), c.counter_hypothesis.as_str()))
        .unwrap_or(("[Fragile Convention]", "[Radical counter-hypothesis]"));
    format!("The market believes in \"{convention}\", but the truth is that {counter}.")
}

/// Plain-text review of the final selection, shown before the manifesto.
pub fn render_summary(thesis: &ThesisData, error: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(error) = error {
        let _ = writeln!(out, "Last generation error: {error}\n");
    }

    let Some(model) = thesis.selected_model() else {
        out.push_str(SUMMARY_UNAVAILABLE);
        return out;
    };
    let hypothesis = thesis
        .selected_hypothesis()
        .map_or(HYPOTHESIS_PLACEHOLDER, |h| h.idea.as_str());

    let manifesto = &thesis.final_thesis.product_manifesto;
    if is_filled(&manifesto.name) {
        let _ = writeln!(out, "{}\n", manifesto.name);
    }

    let _ = writeln!(out, "SELECTED HYPOTHESIS\n  \"{hypothesis}\"\n");
    let _ = writeln!(
        out,
        "JUSTIFICATION\n  {}\n",
        thesis.final_thesis.justification
    );
    let _ = writeln!(out, "THESIS STATEMENT\n  {}\n", thesis_statement(thesis));
    let _ = writeln!(out, "CORE BLUEPRINT");
    let _ = writeln!(
        out,
        "  UVP: {}",
        model.lean_canvas.unique_value_proposition
    );
    let _ = writeln!(
        out,
        "  Unfair advantage: {}",
        model.lean_canvas.unfair_advantage
    );
    let _ = writeln!(out, "  Flywheel: {}", model.flywheel);

    if let Some(score) = thesis.unicorn_score {
        let _ = writeln!(out, "\nUNICORN SCORE\n  {score:.0}/100");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesis_core::{BusinessModel, Convention, IdeationHypothesis};

    fn summarized() -> ThesisData {
        let mut model = BusinessModel {
            flywheel: "network of templates".to_string(),
            ..Default::default()
        };
        model.lean_canvas.unique_value_proposition = "contracts in minutes".to_string();
        model.lean_canvas.unfair_advantage = "proprietary clause graph".to_string();

        let mut thesis = ThesisData {
            conventions: vec![Convention::new("lawyers are required", "templates suffice")],
            ideation_hypotheses: vec![
                IdeationHypothesis::new("SCAMPER", "first"),
                IdeationHypothesis::new("ANALOGY", "second"),
            ],
            selected_hypotheses: vec![1],
            business_models: vec![model],
            ..Default::default()
        };
        thesis.final_thesis.selected_model_index = Some(0);
        thesis.final_thesis.justification = "fastest path to revenue".to_string();
        thesis
    }

    #[test]
    fn test_summary_lists_selection() {
        let summary = render_summary(&summarized(), None);
        assert!(summary.contains("\"second\""));
        assert!(summary.contains("fastest path to revenue"));
        assert!(summary.contains("UVP: contracts in minutes"));
        assert!(summary.contains("Unfair advantage: proprietary clause graph"));
        assert!(summary.contains("Flywheel: network of templates"));
        assert!(!summary.contains("UNICORN SCORE"));
    }

    #[test]
    fn test_model_without_recorded_hypothesis_is_still_summarized() {
        let mut thesis = summarized();
        thesis.selected_hypotheses.clear();

        let summary = render_summary(&thesis, None);
        assert!(summary.contains(HYPOTHESIS_PLACEHOLDER));
        assert!(summary.contains("UVP: contracts in minutes"));
        assert!(summary.contains("Unfair advantage: proprietary clause graph"));
        assert!(summary.contains("Flywheel: network of templates"));
        assert!(!summary.contains(SUMMARY_UNAVAILABLE));
    }

    #[test]
    fn test_summary_fallback_without_selection() {
        let mut thesis = summarized();
        thesis.final_thesis.selected_model_index = None;
        assert_eq!(render_summary(&thesis, None), SUMMARY_UNAVAILABLE);

        let with_error = render_summary(&thesis, Some("timed out"));
        assert!(with_error.starts_with("Last generation error: timed out"));
        assert!(with_error.ends_with(SUMMARY_UNAVAILABLE));
    }

    #[test]
    fn test_thesis_statement_prefers_written_text() {
        let mut thesis = summarized();
        assert_eq!(
            thesis_statement(&thesis),
            "The market believes in \"lawyers are required\", but the truth is that templates suffice."
        );

        thesis.final_thesis.product_manifesto.thesis_statement = "Contracts are code.".to_string();
        assert_eq!(thesis_statement(&thesis), "Contracts are code.");
    }

    #[test]
    fn test_unicorn_score_is_shown_when_present() {
        let mut thesis = summarized();
        thesis.unicorn_score = Some(87.4);
        assert!(render_summary(&thesis, None).contains("87/100"));
    }
}
