use serde::{Deserialize, Serialize};

/// True when a free-text answer carries content.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

// ============================================
// Phase 1: deconstruction
// ============================================

/// A fragile market convention paired with its radical counter-hypothesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Convention {
    pub statement: String,
    pub counter_hypothesis: String,
}

impl Convention {
    pub fn new(statement: impl Into<String>, counter_hypothesis: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            counter_hypothesis: counter_hypothesis.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        is_filled(&self.statement) && is_filled(&self.counter_hypothesis)
    }
}

/// The main job: verb + object + context + outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Jtbd {
    pub verb: String,
    pub object: String,
    pub context: String,
    pub outcome: String,
}

impl Jtbd {
    /// The canonical job statement, substituted verbatim.
    pub fn sentence(&self) -> String {
        format!(
            "When {}, help me to {} {}, so I can {}.",
            self.context, self.verb, self.object, self.outcome
        )
    }

    pub fn is_complete(&self) -> bool {
        [&self.verb, &self.object, &self.context, &self.outcome]
            .iter()
            .all(|v| is_filled(v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JtbdDimensions {
    pub functional: String,
    pub emotional: String,
    pub social: String,
}

impl JtbdDimensions {
    pub fn is_complete(&self) -> bool {
        [&self.functional, &self.emotional, &self.social]
            .iter()
            .all(|v| is_filled(v))
    }
}

/// The four forces of progress acting on a switching customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressForces {
    pub push: String,
    pub pull: String,
    pub anxiety: String,
    pub habit: String,
}

impl ProgressForces {
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 4] {
        [
            ("Push of the situation", &mut self.push),
            ("Pull of the new solution", &mut self.pull),
            ("Anxiety of the new solution", &mut self.anxiety),
            ("Habit of the present", &mut self.habit),
        ]
    }

    pub fn is_complete(&self) -> bool {
        [&self.push, &self.pull, &self.anxiety, &self.habit]
            .iter()
            .all(|v| is_filled(v))
    }
}

// ============================================
// Phase 2: ecosystem analysis
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PestelAnalysis {
    pub political: String,
    pub economic: String,
    pub social: String,
    pub technological: String,
    pub environmental: String,
    pub legal: String,
}

impl PestelAnalysis {
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 6] {
        [
            ("Political", &mut self.political),
            ("Economic", &mut self.economic),
            ("Social", &mut self.social),
            ("Technological", &mut self.technological),
            ("Environmental", &mut self.environmental),
            ("Legal", &mut self.legal),
        ]
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.political,
            &self.economic,
            &self.social,
            &self.technological,
            &self.environmental,
            &self.legal,
        ]
        .iter()
        .all(|v| is_filled(v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PorterFiveForces {
    pub new_entrants: String,
    pub buyers_power: String,
    pub suppliers_power: String,
    pub substitutes: String,
    pub rivalry: String,
}

impl PorterFiveForces {
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 5] {
        [
            ("Threat of new entrants", &mut self.new_entrants),
            ("Bargaining power of buyers", &mut self.buyers_power),
            ("Bargaining power of suppliers", &mut self.suppliers_power),
            ("Threat of substitute products", &mut self.substitutes),
            ("Rivalry among existing competitors", &mut self.rivalry),
        ]
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.new_entrants,
            &self.buyers_power,
            &self.suppliers_power,
            &self.substitutes,
            &self.rivalry,
        ]
        .iter()
        .all(|v| is_filled(v))
    }
}

/// Eliminate / Reduce / Raise / Create grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueOceanStrategy {
    pub eliminate: Vec<String>,
    pub reduce: Vec<String>,
    pub raise: Vec<String>,
    pub create: Vec<String>,
}

impl BlueOceanStrategy {
    pub fn fields_mut(&mut self) -> [(&'static str, &mut Vec<String>); 4] {
        [
            ("Eliminate", &mut self.eliminate),
            ("Reduce", &mut self.reduce),
            ("Raise", &mut self.raise),
            ("Create", &mut self.create),
        ]
    }

    pub fn is_complete(&self) -> bool {
        !self.eliminate.is_empty()
            && !self.reduce.is_empty()
            && !self.raise.is_empty()
            && !self.create.is_empty()
    }
}

// ============================================
// Phase 3: ideation
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeationHypothesis {
    /// Where the idea came from, e.g. `SCAMPER` or `ANALOGY`.
    pub source: String,
    pub idea: String,
}

impl IdeationHypothesis {
    pub const SCAMPER: &'static str = "SCAMPER";
    pub const ANALOGY: &'static str = "ANALOGY";

    pub fn new(source: impl Into<String>, idea: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            idea: idea.into(),
        }
    }
}

// ============================================
// Phase 4: business modeling
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeanCanvas {
    pub problem: String,
    pub customer_segments: String,
    pub unique_value_proposition: String,
    pub solution: String,
    pub unfair_advantage: String,
    pub revenue_streams: String,
    pub cost_structure: String,
    pub key_metrics: String,
    pub channels: String,
}

impl LeanCanvas {
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 9] {
        [
            ("Problem", &mut self.problem),
            ("Customer segments", &mut self.customer_segments),
            ("Unique value proposition", &mut self.unique_value_proposition),
            ("Solution", &mut self.solution),
            ("Unfair advantage", &mut self.unfair_advantage),
            ("Revenue streams", &mut self.revenue_streams),
            ("Cost structure", &mut self.cost_structure),
            ("Key metrics", &mut self.key_metrics),
            ("Channels", &mut self.channels),
        ]
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.problem,
            &self.customer_segments,
            &self.unique_value_proposition,
            &self.solution,
            &self.unfair_advantage,
            &self.revenue_streams,
            &self.cost_structure,
            &self.key_metrics,
            &self.channels,
        ]
        .iter()
        .all(|v| is_filled(v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookModel {
    pub trigger: String,
    pub action: String,
    pub variable_reward: String,
    pub investment: String,
}

impl HookModel {
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 4] {
        [
            ("Trigger", &mut self.trigger),
            ("Action", &mut self.action),
            ("Variable reward", &mut self.variable_reward),
            ("Investment", &mut self.investment),
        ]
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.trigger,
            &self.action,
            &self.variable_reward,
            &self.investment,
        ]
        .iter()
        .all(|v| is_filled(v))
    }
}

/// Business model for one selected hypothesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessModel {
    pub lean_canvas: LeanCanvas,
    pub hook_model: HookModel,
    pub flywheel: String,
}

impl BusinessModel {
    pub fn is_complete(&self) -> bool {
        self.lean_canvas.is_complete() && self.hook_model.is_complete() && is_filled(&self.flywheel)
    }
}

// ============================================
// Phase 5: final thesis
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductManifesto {
    pub name: String,
    pub thesis_statement: String,
    pub core_ai_magic: String,
    pub addicting_experience: String,
    pub growth_engine: String,
    pub competitive_moat: String,
    pub monetization_strategy: String,
    pub evolutionary_roadmap: String,
}

impl ProductManifesto {
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 8] {
        [
            ("Product name", &mut self.name),
            ("Thesis statement", &mut self.thesis_statement),
            ("Core AI magic", &mut self.core_ai_magic),
            ("Addicting experience", &mut self.addicting_experience),
            ("Growth engine", &mut self.growth_engine),
            ("Competitive moat", &mut self.competitive_moat),
            ("Monetization strategy", &mut self.monetization_strategy),
            ("Evolutionary roadmap", &mut self.evolutionary_roadmap),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalThesis {
    /// Index into `ThesisData::business_models`; `-1` on the wire when unset.
    #[serde(with = "crate::domain::model_index")]
    pub selected_model_index: Option<usize>,
    pub justification: String,
    pub product_manifesto: ProductManifesto,
}

// ============================================
// The thesis document
// ============================================

/// The single record accumulated across every wizard step.
///
/// Each group of fields is owned by one step. Writes replace a whole
/// top-level field (see [`crate::ThesisUpdate`]); nothing here validates the
/// cross-field invariants, which the wizard checks before advancing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThesisData {
    // Phase 0: activation
    pub excavation_domain: String,
    pub creator_context: String,
    pub ambition_level: String,

    // Phase 1: deconstruction
    pub domain: String,
    pub human_need: String,
    pub ai_feedback: String,
    pub truths: Vec<String>,
    pub conventions: Vec<Convention>,
    pub jtbd: Jtbd,
    pub jtbd_dimensions: JtbdDimensions,
    pub progress_forces: ProgressForces,

    // Phase 2: ecosystem analysis
    pub pestel_analysis: PestelAnalysis,
    pub porter_five_forces: PorterFiveForces,
    pub blue_ocean_strategy: BlueOceanStrategy,

    // Phase 3: ideation
    pub ideation_hypotheses: Vec<IdeationHypothesis>,
    pub selected_hypotheses: Vec<usize>,

    // Phase 4: business modeling
    pub business_models: Vec<BusinessModel>,

    // Phase 5: final thesis
    pub final_thesis: FinalThesis,

    /// 0-100 score assigned by the generation service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicorn_score: Option<f64>,
}

impl ThesisData {
    /// The business model chosen in the final selection, if the index is valid.
    pub fn selected_model(&self) -> Option<&BusinessModel> {
        self.final_thesis
            .selected_model_index
            .and_then(|i| self.business_models.get(i))
    }

    /// The ideation hypothesis behind the selected business model.
    pub fn selected_hypothesis(&self) -> Option<&IdeationHypothesis> {
        let model_index = self.final_thesis.selected_model_index?;
        let hypothesis_index = *self.selected_hypotheses.get(model_index)?;
        self.ideation_hypotheses.get(hypothesis_index)
    }

    /// Hypotheses picked for business modeling, in selection order.
    pub fn selected_hypothesis_details(&self) -> Vec<Option<&IdeationHypothesis>> {
        self.selected_hypotheses
            .iter()
            .map(|&i| self.ideation_hypotheses.get(i))
            .collect()
    }

    pub fn has_valid_model_selection(&self) -> bool {
        self.selected_model().is_some()
    }

    /// Whether `business_models` lines up one-to-one with the selection.
    pub fn business_models_aligned(&self) -> bool {
        self.business_models.len() == self.selected_hypotheses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_thesis_is_empty() {
        let thesis = ThesisData::default();
        assert!(thesis.excavation_domain.is_empty());
        assert!(thesis.conventions.is_empty());
        assert!(thesis.business_models.is_empty());
        assert_eq!(thesis.final_thesis.selected_model_index, None);
        assert_eq!(thesis.unicorn_score, None);
    }

    #[test]
    fn test_jtbd_sentence() {
        let jtbd = Jtbd {
            verb: "organize".to_string(),
            object: "feedback".to_string(),
            context: "launch".to_string(),
            outcome: "ship faster".to_string(),
        };
        assert_eq!(
            jtbd.sentence(),
            "When launch, help me to organize feedback, so I can ship faster."
        );
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(ThesisData::default()).unwrap();
        assert!(json.get("excavationDomain").is_some());
        assert!(json.get("porterFiveForces").is_some());
        assert_eq!(json["finalThesis"]["selectedModelIndex"], -1);
        assert!(json.get("unicornScore").is_none());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let json = r#"{
            "domain": "legal tech",
            "businessModels": [{"flywheel": "referrals"}],
            "finalThesis": {"selectedModelIndex": 0}
        }"#;

        let thesis: ThesisData = serde_json::from_str(json).unwrap();
        assert_eq!(thesis.domain, "legal tech");
        assert_eq!(thesis.business_models.len(), 1);
        assert_eq!(thesis.business_models[0].lean_canvas, LeanCanvas::default());
        assert_eq!(thesis.selected_model().map(|m| m.flywheel.as_str()), Some("referrals"));
    }

    #[test]
    fn test_selected_hypothesis_follows_selection_order() {
        let thesis = ThesisData {
            ideation_hypotheses: vec![
                IdeationHypothesis::new("SCAMPER", "a"),
                IdeationHypothesis::new("SCAMPER", "b"),
                IdeationHypothesis::new("ANALOGY", "c"),
            ],
            selected_hypotheses: vec![2, 0, 1],
            business_models: vec![BusinessModel::default(); 3],
            final_thesis: FinalThesis {
                selected_model_index: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(thesis.selected_hypothesis().map(|h| h.idea.as_str()), Some("a"));
    }

    #[test]
    fn test_out_of_range_selection_is_not_valid() {
        let thesis = ThesisData {
            business_models: vec![BusinessModel::default()],
            final_thesis: FinalThesis {
                selected_model_index: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!thesis.has_valid_model_selection());
    }

    #[test]
    fn test_business_model_completeness() {
        let mut model = BusinessModel::default();
        assert!(!model.is_complete());

        for (_, value) in model.lean_canvas.fields_mut() {
            *value = "x".to_string();
        }
        for (_, value) in model.hook_model.fields_mut() {
            *value = "y".to_string();
        }
        assert!(!model.is_complete());

        model.flywheel = "loop".to_string();
        assert!(model.is_complete());
    }
}
