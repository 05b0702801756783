//! Renders the final coding-prompt manifesto.

use thesis_core::domain::thesis::is_filled;
use thesis_core::ThesisData;

/// Returned instead of a manifesto when no business model has been chosen.
pub const MANIFESTO_UNAVAILABLE: &str =
    "Error: no business model has been selected, so the manifesto cannot be generated.";

const PRODUCT_NAME_PLACEHOLDER: &str = "[Product Name]";
const CONVENTION_PLACEHOLDER: &str = "[Fragile Convention]";
const COUNTER_HYPOTHESIS_PLACEHOLDER: &str = "[Radical counter-hypothesis]";

/// The two ways a finished thesis reaches the formatter.
#[derive(Debug, Clone, Copy)]
pub enum Draft<'a> {
    /// Filled in step by step; the manifesto is rendered from the document.
    Manual(&'a ThesisData),
    /// Produced by the generation service, which also wrote the manifesto.
    Generated {
        thesis: &'a ThesisData,
        manifesto: &'a str,
    },
}

impl<'a> Draft<'a> {
    pub fn thesis(&self) -> &'a ThesisData {
        match self {
            Draft::Manual(thesis) => thesis,
            Draft::Generated { thesis, .. } => thesis,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Draft::Generated { manifesto, .. } => manifesto.to_string(),
            Draft::Manual(thesis) => render_manual(thesis),
        }
    }
}

fn or_placeholder<'s>(value: &'s str, placeholder: &'s str) -> &'s str {
    if is_filled(value) {
        value
    } else {
        placeholder
    }
}

fn render_manual(thesis: &ThesisData) -> String {
    let Some(model) = thesis.selected_model() else {
        return MANIFESTO_UNAVAILABLE.to_string();
    };

    let product_name = or_placeholder(
        &thesis.final_thesis.product_manifesto.name,
        PRODUCT_NAME_PLACEHOLDER,
    );
    let (convention, counter_hypothesis) = match thesis.conventions.first() {
        Some(c) => (
            or_placeholder(&c.statement, CONVENTION_PLACEHOLDER),
            or_placeholder(&c.counter_hypothesis, COUNTER_HYPOTHESIS_PLACEHOLDER),
        ),
        None => (CONVENTION_PLACEHOLDER, COUNTER_HYPOTHESIS_PLACEHOLDER),
    };
    let truths = thesis
        .truths
        .iter()
        .map(|t| format!("  - {t}"))
        .collect::<Vec<_>>()
        .join("\n");
    let dimensions = &thesis.jtbd_dimensions;
    let uvp = &model.lean_canvas.unique_value_proposition;

    format!(
        r#"# CODING PROMPT-MANIFESTO FOR MVP: {product_name}

### <role_and_goal>
You are a 10x Senior AI Developer, a "code craftsman" who specializes in turning strategic visions into elegant, functional and self-contained MVPs. Your mission is to read this detailed briefing, the result of a deep strategic analysis, and generate the complete code for the application in a single HTML file, perfectly aligned with the vision.

### <strategic_context>
* **The Latent Pain (Reason to Exist):** The root of the problem is the fundamental human need for **{human_need}**. In the domain of **{domain}**, this shows up as a constant struggle.
* **The Job To Be Done (The User's Mission):** **{jtbd}**
  - **Functionally:** {functional}
  - **Emotionally:** {emotional}
  - **Socially:** {social}
* **The Secret (Our Investment Thesis):** Most people in {domain} believe that "{convention}", but the truth is that {counter_hypothesis}, and we will be the first to build on that truth. Our unique value proposition: {uvp}
* **The Fundamental Truths:** Our strategy is built on solid rock:
{truths}
* **The Flywheel (Why It Compounds):** {flywheel}

### <core_ai_magic_explained>
(A detailed technical explanation of the core AI function, written for another senior developer. Include the step-by-step logic the AI must follow.)

### <mvp_specifications>
* **User Persona (Our Hero):** (A detailed description of who this MVP is for, including their pains and motivations.)
* **Main User Story (The "Aha!" Moment):** "As a [User Persona], I want to [perform the main action] so that [I get the main value, feel '{emotional}' and am seen as '{social}']."
* **User Flow (Step by Step):**
  1. The user opens the page and sees [description of the initial screen, focused on the unique value proposition].
  2. They enter [specific input] into [UI component].
  3. They click the button labeled "[exact CTA text]".
  4. The result appears, solving the Job To Be Done.
* **Feature List (Unambiguous Scope):**
  * Feature 1: (Precise, unambiguous description.)
  * Feature 2: (Precise, unambiguous description.)

### <technical_stack_and_constraints>
* **Stack:** HTML, Vanilla JavaScript (ES6+), CSS.
* **Dependencies:** Strictly NONE.
* **Code Structure:** A single `index.html` file.
* **APIs:** Use the native `fetch` API for external calls.

### <ui_ux_design_principles>
* **Visual Style:** Functional brutalism. Background #101010, text #EAEAEA, accent #0070F3. Monospace font for inputs and sans-serif for the UI.
* **Frictionless Journey:** The fewest possible clicks to the "Aha!" moment.

### <final_output_instructions>
* **Output Format:** The complete code block for the `index.html` file.
* **Code Quality:** Clean, well formatted and extensively commented.
"#,
        human_need = thesis.human_need,
        domain = thesis.domain,
        jtbd = thesis.jtbd.sentence(),
        functional = dimensions.functional,
        emotional = dimensions.emotional,
        social = dimensions.social,
        flywheel = model.flywheel,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesis_core::{BusinessModel, Convention, Jtbd};

    fn selected_thesis() -> ThesisData {
        let mut thesis = ThesisData {
            domain: "legal tech".to_string(),
            human_need: "security".to_string(),
            truths: vec![
                "Contracts are mostly boilerplate".to_string(),
                "Lawyers bill by the hour".to_string(),
            ],
            conventions: vec![Convention::new(
                "contracts need a lawyer",
                "most contracts need a good template",
            )],
            jtbd: Jtbd {
                verb: "organize".to_string(),
                object: "feedback".to_string(),
                context: "launching a product".to_string(),
                outcome: "prioritize the roadmap".to_string(),
            },
            selected_hypotheses: vec![0],
            business_models: vec![BusinessModel {
                flywheel: "More drafts train better templates".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        thesis.final_thesis.selected_model_index = Some(0);
        thesis
    }

    #[test]
    fn test_unselected_model_yields_sentinel() {
        let mut thesis = selected_thesis();
        thesis.final_thesis.selected_model_index = None;
        assert_eq!(Draft::Manual(&thesis).render(), MANIFESTO_UNAVAILABLE);

        thesis.final_thesis.selected_model_index = Some(7);
        assert_eq!(Draft::Manual(&thesis).render(), MANIFESTO_UNAVAILABLE);
    }

    #[test]
    fn test_jtbd_sentence_is_substituted_verbatim() {
        let rendered = Draft::Manual(&selected_thesis()).render();
        assert!(rendered.contains(
            "When launching a product, help me to organize feedback, so I can prioritize the roadmap."
        ));
    }

    #[test]
    fn test_minimal_document_renders_jtbd_and_first_convention() {
        let mut thesis = ThesisData {
            conventions: vec![Convention::new("X", "Y")],
            jtbd: Jtbd {
                verb: "organize".to_string(),
                object: "feedback".to_string(),
                context: "launch".to_string(),
                outcome: "ship faster".to_string(),
            },
            selected_hypotheses: vec![0],
            business_models: vec![BusinessModel::default()],
            ..Default::default()
        };
        thesis.final_thesis.selected_model_index = Some(0);

        let rendered = Draft::Manual(&thesis).render();
        assert!(rendered.contains("When launch, help me to organize feedback, so I can ship faster."));
        assert!(rendered.contains("believe that \"X\""));
        assert!(rendered.contains("the truth is that Y"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let thesis = selected_thesis();
        assert_eq!(
            Draft::Manual(&thesis).render(),
            Draft::Manual(&thesis).render()
        );
    }

    #[test]
    fn test_sections_appear_in_order() {
        let rendered = Draft::Manual(&selected_thesis()).render();
        let markers = [
            "<strategic_context>",
            "The Job To Be Done",
            "The Secret",
            "The Flywheel",
            "<core_ai_magic_explained>",
            "<mvp_specifications>",
            "<technical_stack_and_constraints>",
            "<ui_ux_design_principles>",
            "<final_output_instructions>",
        ];
        let positions: Vec<usize> = markers
            .iter()
            .map(|m| rendered.find(m).unwrap_or_else(|| panic!("missing {m}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_manual_render_interpolates_document() {
        let rendered = Draft::Manual(&selected_thesis()).render();
        assert!(rendered.starts_with("# CODING PROMPT-MANIFESTO FOR MVP: [Product Name]"));
        assert!(rendered.contains("believe that \"contracts need a lawyer\""));
        assert!(rendered.contains("the truth is that most contracts need a good template"));
        assert!(rendered.contains("  - Lawyers bill by the hour"));
        assert!(rendered.contains("More drafts train better templates"));
    }

    #[test]
    fn test_missing_convention_uses_placeholders() {
        let mut thesis = selected_thesis();
        thesis.conventions.clear();
        let rendered = Draft::Manual(&thesis).render();
        assert!(rendered.contains("believe that \"[Fragile Convention]\""));
        assert!(rendered.contains("[Radical counter-hypothesis]"));
    }

    #[test]
    fn test_generated_manifesto_is_returned_verbatim() {
        let thesis = ThesisData::default();
        let draft = Draft::Generated {
            thesis: &thesis,
            manifesto: "# Generated\nas is",
        };
        assert_eq!(draft.render(), "# Generated\nas is");
    }
}
