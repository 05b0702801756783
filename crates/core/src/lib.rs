//! Domain model for the thesis wizard.
//!
//! Holds the [`ThesisData`] record that every wizard step reads and writes,
//! the [`WizardStep`] identifiers, and the typed whole-field updates used to
//! mutate the record.

pub mod domain;
pub mod error;

pub use domain::step::WizardStep;
pub use domain::thesis::{
    BlueOceanStrategy, BusinessModel, Convention, FinalThesis, HookModel, IdeationHypothesis,
    Jtbd, JtbdDimensions, LeanCanvas, PestelAnalysis, PorterFiveForces, ProductManifesto,
    ProgressForces, ThesisData,
};
pub use domain::update::{ThesisField, ThesisUpdate};
pub use error::CoreError;
