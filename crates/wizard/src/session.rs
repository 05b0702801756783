use chrono::{DateTime, Utc};
use thesis_core::{Convention, ThesisData, ThesisUpdate, WizardStep};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::completeness::StepRules;
use crate::edits;
use crate::error::{Result, WizardError};
use crate::generation::{ThesisGenerator, DEFAULT_MAX_ATTEMPTS};
use crate::oracle::{GenerationRequest, ThesisOracle};
use crate::prompts::Locale;
use crate::state_machine::StepSequencer;
use crate::store::ThesisStore;
use crate::summary::render_summary;

/// Stored in `aiFeedback` when the coaching call fails.
pub const FEEDBACK_UNAVAILABLE: &str =
    "There was an error getting feedback. Please check your API key and try again.";

/// One user's pass through the wizard: the current step plus the document.
#[derive(Debug, Clone)]
pub struct WizardSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    step: WizardStep,
    store: ThesisStore,
    locale: Locale,
    max_generation_attempts: u32,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl WizardSession {
    pub fn new(locale: Locale) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            step: StepSequencer::initial(),
            store: ThesisStore::new(),
            locale,
            max_generation_attempts: DEFAULT_MAX_ATTEMPTS,
        };
        info!(session_id = %session.id, locale = %session.locale, "Wizard session started");
        session
    }

    pub fn with_max_generation_attempts(mut self, attempts: u32) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn thesis(&self) -> &ThesisData {
        self.store.thesis()
    }

    pub fn store(&self) -> &ThesisStore {
        &self.store
    }

    pub fn error(&self) -> Option<&str> {
        self.store.error()
    }

    /// Replace one top-level field. Changing the human need also clears the
    /// coaching feedback given for the old one.
    pub fn update(&mut self, update: ThesisUpdate) {
        match update {
            ThesisUpdate::HumanNeed(need) => {
                let updates = edits::set_human_need(self.store.thesis(), need);
                self.store.update_all(updates);
            }
            other => self.store.update(other),
        }
    }

    pub fn update_all(&mut self, updates: impl IntoIterator<Item = ThesisUpdate>) {
        for update in updates {
            self.update(update);
        }
    }

    pub fn is_step_complete(&self) -> bool {
        StepRules::is_complete(self.step, self.store.thesis())
    }

    /// Move to the next step once the current one is complete. At the last
    /// step this is a no-op.
    pub fn advance(&mut self) -> Result<WizardStep> {
        if StepSequencer::is_terminal(self.step) {
            return Ok(self.step);
        }
        if !self.is_step_complete() {
            return Err(WizardError::IncompleteStep(self.step));
        }

        let next = StepSequencer::advance(self.step);
        self.transition_to(next)?;
        self.prepare_step();
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<WizardStep> {
        if StepSequencer::is_initial(self.step) || self.step == WizardStep::Generating {
            return Ok(self.step);
        }
        let previous = StepSequencer::retreat(self.step);
        self.transition_to(previous)?;
        Ok(self.step)
    }

    /// Drop the document, any generated manifesto and error, and start over.
    pub fn reset(&mut self) {
        info!(session_id = %self.id, "Resetting wizard");
        self.store.reset();
        self.step = StepSequencer::initial();
    }

    /// Replace the document with one loaded from elsewhere; the step is kept.
    pub fn load(&mut self, thesis: ThesisData) {
        self.store = ThesisStore::from_thesis(thesis);
    }

    /// Continue a saved thesis at the named step. Unknown names, and the
    /// transient `generating` step, start again from the first step.
    pub fn resume(
        &mut self,
        thesis: ThesisData,
        manifesto: Option<String>,
        step_name: &str,
    ) -> WizardStep {
        self.store = match manifesto {
            Some(manifesto) => {
                let mut store = ThesisStore::new();
                store.replace(thesis, manifesto);
                store
            }
            None => ThesisStore::from_thesis(thesis),
        };

        self.step = match step_name.parse::<WizardStep>() {
            Ok(WizardStep::Generating) => StepSequencer::initial(),
            Ok(step) => step,
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Resuming from the first step");
                StepSequencer::initial()
            }
        };
        info!(session_id = %self.id, step = %self.step, "Session resumed");
        self.prepare_step();
        self.step
    }

    fn transition_to(&mut self, to: WizardStep) -> Result<()> {
        StepSequencer::validate_transition(self.step, to)?;
        info!(session_id = %self.id, from = %self.step, to = %to, "Step transition");
        self.step = to;
        Ok(())
    }

    /// Seed the lists some steps expect before they are shown.
    fn prepare_step(&mut self) {
        let thesis = self.store.thesis();
        match self.step {
            WizardStep::Conventions if thesis.conventions.is_empty() => {
                self.store
                    .update(ThesisUpdate::Conventions(vec![Convention::default()]));
            }
            WizardStep::BusinessModel => {
                if let Some(update) = edits::align_business_models(thesis) {
                    debug!("Reinitializing business models for the current selection");
                    self.store.update(update);
                }
            }
            _ => {}
        }
    }

    /// Ask the oracle to coach the current human need and store the reply.
    /// A failed call stores a fixed apology instead of surfacing an error.
    pub async fn request_feedback(&mut self, oracle: &dyn ThesisOracle) -> &str {
        let need = self.store.thesis().human_need.clone();
        let feedback = match oracle.socratic_feedback(&need).await {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!(error = %e, "Socratic feedback failed");
                FEEDBACK_UNAVAILABLE.to_string()
            }
        };
        self.store.update(ThesisUpdate::AiFeedback(feedback));
        &self.store.thesis().ai_feedback
    }

    /// Generate a whole thesis from the activation seeds.
    ///
    /// Passes through the `Generating` pseudo-step and lands on `Summary`
    /// with the generated document, or back on `Activation` with the error
    /// recorded.
    pub async fn generate(&mut self, oracle: &dyn ThesisOracle) -> Result<()> {
        self.transition_to(WizardStep::Generating)?;
        self.store.clear_error();

        let request = GenerationRequest::from_thesis(self.locale.clone(), self.store.thesis());
        match ThesisGenerator::generate(oracle, &request, self.max_generation_attempts).await {
            Ok(generated) => {
                self.store.replace(generated.thesis, generated.manifesto);
                self.transition_to(WizardStep::Summary)?;
                Ok(())
            }
            Err(e) => {
                self.store.set_error(e.to_string());
                self.transition_to(StepSequencer::initial())?;
                Err(e)
            }
        }
    }

    pub fn manifesto(&self) -> String {
        self.store.draft().render()
    }

    pub fn summary(&self) -> String {
        render_summary(self.store.thesis(), self.store.error())
    }
}
