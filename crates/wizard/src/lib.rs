//! The thesis wizard: step sequencing, the document store, completeness
//! rules, manifesto rendering and the generation/coaching calls.

pub mod completeness;
pub mod edits;
pub mod error;
pub mod generation;
pub mod manifesto;
pub mod oracle;
pub mod prompts;
pub mod response_parser;
pub mod session;
pub mod state_machine;
pub mod store;
pub mod summary;

pub use completeness::StepRules;
pub use error::{Result, WizardError};
pub use generation::{validate_generated, ThesisGenerator, DEFAULT_MAX_ATTEMPTS};
pub use manifesto::{Draft, MANIFESTO_UNAVAILABLE};
pub use oracle::{
    GeneratedThesis, GenerationRequest, OfflineOracle, OpenRouterOracle, ThesisOracle,
};
pub use prompts::{GenerationPrompts, Locale};
pub use response_parser::ResponseParser;
pub use session::{WizardSession, FEEDBACK_UNAVAILABLE};
pub use state_machine::StepSequencer;
pub use store::ThesisStore;
pub use summary::{render_summary, thesis_statement};
