//! The external collaborators behind automatic generation and coaching.

use async_trait::async_trait;
use genai::{ChatMessage, OpenRouterClient};
use serde::{Deserialize, Serialize};
use thesis_core::{
    BlueOceanStrategy, BusinessModel, Convention, FinalThesis, HookModel, IdeationHypothesis,
    Jtbd, JtbdDimensions, LeanCanvas, PestelAnalysis, PorterFiveForces, ProductManifesto,
    ProgressForces, ThesisData,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::manifesto::Draft;
use crate::prompts::{GenerationPrompts, Locale};
use crate::response_parser::ResponseParser;

const DEFAULT_TEMPERATURE: f32 = 1.1;

/// Inputs to one automatic generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub locale: Locale,
    pub excavation_domain: String,
    pub creator_context: String,
    pub ambition_level: String,
}

impl GenerationRequest {
    pub fn from_thesis(locale: Locale, thesis: &ThesisData) -> Self {
        Self {
            locale,
            excavation_domain: thesis.excavation_domain.clone(),
            creator_context: thesis.creator_context.clone(),
            ambition_level: thesis.ambition_level.clone(),
        }
    }
}

/// A complete thesis document and the manifesto written for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedThesis {
    #[serde(rename = "thesisData")]
    pub thesis: ThesisData,
    #[serde(default)]
    pub manifesto: String,
}

#[async_trait]
pub trait ThesisOracle: Send + Sync {
    fn name(&self) -> &str;

    /// One generation attempt. The result is not validated here.
    async fn generate_thesis(&self, request: &GenerationRequest) -> Result<GeneratedThesis>;

    /// Coaching on the user's stated human need, at most two sentences.
    async fn socratic_feedback(&self, human_need: &str) -> Result<String>;
}

/// Oracle backed by an OpenRouter-compatible chat model.
pub struct OpenRouterOracle {
    client: OpenRouterClient,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl OpenRouterOracle {
    pub fn new(client: OpenRouterClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl ThesisOracle for OpenRouterOracle {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate_thesis(&self, request: &GenerationRequest) -> Result<GeneratedThesis> {
        let prompt = GenerationPrompts::thesis(request);
        debug!(model = %self.model, locale = %request.locale, "Requesting thesis generation");

        let content = self
            .client
            .chat_completion_json(
                vec![ChatMessage::user(prompt)],
                &self.model,
                Some(self.temperature),
                self.max_tokens,
            )
            .await?;

        ResponseParser::parse_json(&content)
    }

    async fn socratic_feedback(&self, human_need: &str) -> Result<String> {
        let prompt = GenerationPrompts::socratic_feedback(human_need);
        let content = self
            .client
            .chat_completion(vec![ChatMessage::user(prompt)], &self.model, None, None)
            .await?;

        Ok(content.trim().to_string())
    }
}

/// Deterministic stand-in used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineOracle;

impl OfflineOracle {
    pub const DEEP_NEED_REPLY: &'static str =
        "Exactly. The desire for status is a powerful driver. Keep this core need in mind as we proceed.";
    pub const PROBING_REPLY: &'static str =
        "And why do they believe that is the solution? What deeper feeling or outcome are they truly searching for?";

    pub fn sample_thesis() -> ThesisData {
        let domain = "AI-powered tools for solo legal practitioners";

        ThesisData {
            unicorn_score: Some(88.0),
            excavation_domain: domain.to_string(),
            creator_context: "Solopreneur with strong technical skills, no initial investment, 15 hours/week.".to_string(),
            ambition_level: "Create a Micro-SaaS B2B reaching $10k MRR in 24 months.".to_string(),
            domain: domain.to_string(),
            human_need: "The need for leverage and efficiency to compete with larger firms.".to_string(),
            ai_feedback: "Precisely. The core struggle is the asymmetry of resources. This is a powerful foundation.".to_string(),
            truths: vec![
                "Legal work is language-based.".to_string(),
                "Time is the primary inventory of a lawyer.".to_string(),
                "Malpractice risk is a significant constraint.".to_string(),
            ],
            conventions: vec![Convention::new(
                "Legal software must be complex and feature-rich.",
                "A single, elegant tool that does one job 10x better is superior.",
            )],
            jtbd: Jtbd {
                verb: "draft".to_string(),
                object: "a routine legal document".to_string(),
                context: "facing a tight deadline".to_string(),
                outcome: "deliver without starting from scratch".to_string(),
            },
            jtbd_dimensions: JtbdDimensions {
                functional: "Reduce drafting time by 90%.".to_string(),
                emotional: "Feel confident and in control.".to_string(),
                social: "Be perceived as modern and efficient.".to_string(),
            },
            progress_forces: ProgressForces {
                push: "Losing hours to repetitive, non-billable work.".to_string(),
                pull: "Focusing only on high-value strategic legal advice.".to_string(),
                anxiety: "Will the AI make a critical error?".to_string(),
                habit: "Old Word document templates are familiar.".to_string(),
            },
            pestel_analysis: PestelAnalysis {
                political: "Stable.".to_string(),
                economic: "Clients are cost-sensitive.".to_string(),
                social: "Growing acceptance of AI in professional services.".to_string(),
                technological: "LLMs are becoming powerful and accessible.".to_string(),
                environmental: "N/A".to_string(),
                legal: "Strict data privacy and confidentiality laws.".to_string(),
            },
            porter_five_forces: PorterFiveForces {
                new_entrants: "High due to AI accessibility.".to_string(),
                buyers_power: "High, clients can choose larger firms.".to_string(),
                suppliers_power: "Low, built on major AI APIs.".to_string(),
                substitutes: "Manual work, hiring paralegals.".to_string(),
                rivalry: "High among existing legal tech giants.".to_string(),
            },
            blue_ocean_strategy: BlueOceanStrategy {
                eliminate: vec!["Complex case management".to_string()],
                reduce: vec!["Feature bloat".to_string()],
                raise: vec!["Speed of document generation".to_string()],
                create: vec!["AI-powered quality assurance checks".to_string()],
            },
            ideation_hypotheses: vec![
                IdeationHypothesis::new(
                    IdeationHypothesis::SCAMPER,
                    "A tool that drafts one high-volume legal document and does it perfectly.",
                ),
                IdeationHypothesis::new(
                    IdeationHypothesis::ANALOGY,
                    "Clause checklists borrowed from aviation pre-flight routines.",
                ),
                IdeationHypothesis::new(
                    IdeationHypothesis::SCAMPER,
                    "A shared template marketplace where solo lawyers sell vetted drafts.",
                ),
            ],
            selected_hypotheses: vec![0, 1, 2],
            business_models: vec![
                sample_model(
                    "Draft a flawless divorce petition in 60 seconds.",
                    "Proprietary template and prompt library.",
                    "High-quality documents lead to lawyer referrals, which drive more usage and better templates.",
                ),
                sample_model(
                    "Never miss a clause again.",
                    "Checklists tuned on real malpractice claims.",
                    "Every caught omission becomes a new checklist item for all users.",
                ),
                sample_model(
                    "Buy the draft a specialist already perfected.",
                    "Two-sided network of vetted authors.",
                    "More authors bring more buyers, which attract more authors.",
                ),
            ],
            final_thesis: FinalThesis {
                selected_model_index: Some(0),
                justification: "Highly focused, solves a high-pain problem, and is achievable within the creator's context.".to_string(),
                product_manifesto: ProductManifesto {
                    name: "LexDrafter".to_string(),
                    thesis_statement: "Solo lawyers win when routine drafting takes seconds, not hours.".to_string(),
                    core_ai_magic: "A guided form feeds a document-specific prompt chain with built-in clause checks.".to_string(),
                    addicting_experience: "A finished, court-ready draft appears before the coffee cools.".to_string(),
                    growth_engine: "Referrals from lawyers who receive LexDrafter documents.".to_string(),
                    competitive_moat: "A growing library of verified templates and prompts.".to_string(),
                    monetization_strategy: "Per-document fee with a monthly unlimited plan.".to_string(),
                    evolutionary_roadmap: "One document type, then the whole family-law workflow.".to_string(),
                },
            },
        }
    }
}

fn sample_model(uvp: &str, unfair_advantage: &str, flywheel: &str) -> BusinessModel {
    BusinessModel {
        lean_canvas: LeanCanvas {
            problem: "Solo lawyers waste time on repetitive document drafting.".to_string(),
            customer_segments: "Solo legal practitioners in family law.".to_string(),
            unique_value_proposition: uvp.to_string(),
            solution: "An AI-powered web form that generates the document.".to_string(),
            unfair_advantage: unfair_advantage.to_string(),
            revenue_streams: "Per-document fee or monthly subscription.".to_string(),
            cost_structure: "API costs, hosting.".to_string(),
            key_metrics: "Documents generated, conversion rate.".to_string(),
            channels: "Niche legal blogs, bar association newsletters.".to_string(),
        },
        hook_model: HookModel {
            trigger: "Receiving a new client case.".to_string(),
            action: "Filling out a simple web form.".to_string(),
            variable_reward: "A drafted document that saves hours of work.".to_string(),
            investment: "Saving the document to a case file.".to_string(),
        },
        flywheel: flywheel.to_string(),
    }
}

#[async_trait]
impl ThesisOracle for OfflineOracle {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate_thesis(&self, request: &GenerationRequest) -> Result<GeneratedThesis> {
        info!(locale = %request.locale, "Using offline sample thesis");
        let thesis = Self::sample_thesis();
        let manifesto = Draft::Manual(&thesis).render();
        Ok(GeneratedThesis { thesis, manifesto })
    }

    async fn socratic_feedback(&self, human_need: &str) -> Result<String> {
        let need = human_need.to_lowercase();
        let reply = if need.contains("status") || need.contains("connection") {
            Self::DEEP_NEED_REPLY
        } else {
            Self::PROBING_REPLY
        };
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completeness::StepRules;
    use crate::generation::validate_generated;
    use crate::state_machine::StepSequencer;
    use genai::RetryPolicy;
    use serde_json::json;
    use thesis_core::WizardStep;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> GenerationRequest {
        GenerationRequest {
            locale: Locale::new("en-US"),
            excavation_domain: "legal tech".to_string(),
            creator_context: "solo".to_string(),
            ambition_level: "$10k MRR".to_string(),
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "gen-1",
            "model": "test-model",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    fn oracle_for(server: &MockServer) -> OpenRouterOracle {
        let client = OpenRouterClient::new("key".to_string(), server.uri())
            .unwrap()
            .with_retry_policy(RetryPolicy::none());
        OpenRouterOracle::new(client, "test-model")
    }

    #[test]
    fn test_sample_thesis_passes_every_manual_step() {
        let thesis = OfflineOracle::sample_thesis();
        for step in StepSequencer::SEQUENCE {
            if matches!(step, WizardStep::Manifesto) {
                continue;
            }
            assert!(StepRules::is_complete(step, &thesis), "{step} incomplete");
        }
    }

    #[tokio::test]
    async fn test_offline_generation_is_valid() {
        let generated = OfflineOracle.generate_thesis(&request()).await.unwrap();
        assert!(validate_generated(&generated.thesis).is_ok());
        assert!(generated.manifesto.contains("LexDrafter"));
    }

    #[tokio::test]
    async fn test_offline_feedback_depends_on_keywords() {
        let oracle = OfflineOracle;
        assert_eq!(
            oracle.socratic_feedback("They crave STATUS").await.unwrap(),
            OfflineOracle::DEEP_NEED_REPLY
        );
        assert_eq!(
            oracle.socratic_feedback("human connection").await.unwrap(),
            OfflineOracle::DEEP_NEED_REPLY
        );
        assert_eq!(
            oracle.socratic_feedback("they need an app").await.unwrap(),
            OfflineOracle::PROBING_REPLY
        );
    }

    #[tokio::test]
    async fn test_openrouter_generation_parses_fenced_json() {
        let server = MockServer::start().await;
        let payload = json!({
            "thesisData": {
                "domain": "legal tech",
                "businessModels": [{}],
                "finalThesis": {"selectedModelIndex": 0}
            },
            "manifesto": "# Ready"
        });
        let content = format!("```json\n{payload}\n```");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"response_format": {"type": "json_object"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(&content)))
            .expect(1)
            .mount(&server)
            .await;

        let generated = oracle_for(&server)
            .generate_thesis(&request())
            .await
            .unwrap();

        assert_eq!(generated.thesis.domain, "legal tech");
        assert_eq!(generated.thesis.business_models.len(), 1);
        assert_eq!(generated.thesis.final_thesis.selected_model_index, Some(0));
        assert_eq!(generated.manifesto, "# Ready");
    }

    #[tokio::test]
    async fn test_openrouter_feedback_is_trimmed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("  Why an app?\n")),
            )
            .mount(&server)
            .await;

        let reply = oracle_for(&server)
            .socratic_feedback("they need an app")
            .await
            .unwrap();
        assert_eq!(reply, "Why an app?");
    }
}
