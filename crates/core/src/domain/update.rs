//! Whole-field updates to a [`ThesisData`] record.
//!
//! Every write replaces exactly one top-level field. Steps build the new
//! value from the current one and hand it over as a [`ThesisUpdate`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::thesis::{
    BlueOceanStrategy, BusinessModel, Convention, FinalThesis, IdeationHypothesis, Jtbd,
    JtbdDimensions, PestelAnalysis, PorterFiveForces, ProgressForces, ThesisData,
};

/// Name of a top-level field of the thesis document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ThesisField {
    ExcavationDomain,
    CreatorContext,
    AmbitionLevel,
    Domain,
    HumanNeed,
    AiFeedback,
    Truths,
    Conventions,
    Jtbd,
    JtbdDimensions,
    ProgressForces,
    PestelAnalysis,
    PorterFiveForces,
    BlueOceanStrategy,
    IdeationHypotheses,
    SelectedHypotheses,
    BusinessModels,
    FinalThesis,
    UnicornScore,
}

impl ThesisField {
    pub const ALL: [ThesisField; 19] = [
        Self::ExcavationDomain,
        Self::CreatorContext,
        Self::AmbitionLevel,
        Self::Domain,
        Self::HumanNeed,
        Self::AiFeedback,
        Self::Truths,
        Self::Conventions,
        Self::Jtbd,
        Self::JtbdDimensions,
        Self::ProgressForces,
        Self::PestelAnalysis,
        Self::PorterFiveForces,
        Self::BlueOceanStrategy,
        Self::IdeationHypotheses,
        Self::SelectedHypotheses,
        Self::BusinessModels,
        Self::FinalThesis,
        Self::UnicornScore,
    ];

    /// Wire name, matching the JSON key of the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExcavationDomain => "excavationDomain",
            Self::CreatorContext => "creatorContext",
            Self::AmbitionLevel => "ambitionLevel",
            Self::Domain => "domain",
            Self::HumanNeed => "humanNeed",
            Self::AiFeedback => "aiFeedback",
            Self::Truths => "truths",
            Self::Conventions => "conventions",
            Self::Jtbd => "jtbd",
            Self::JtbdDimensions => "jtbdDimensions",
            Self::ProgressForces => "progressForces",
            Self::PestelAnalysis => "pestelAnalysis",
            Self::PorterFiveForces => "porterFiveForces",
            Self::BlueOceanStrategy => "blueOceanStrategy",
            Self::IdeationHypotheses => "ideationHypotheses",
            Self::SelectedHypotheses => "selectedHypotheses",
            Self::BusinessModels => "businessModels",
            Self::FinalThesis => "finalThesis",
            Self::UnicornScore => "unicornScore",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl FromStr for ThesisField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// A replacement value for one top-level field.
#[derive(Debug, Clone, PartialEq)]
pub enum ThesisUpdate {
    ExcavationDomain(String),
    CreatorContext(String),
    AmbitionLevel(String),
    Domain(String),
    HumanNeed(String),
    AiFeedback(String),
    Truths(Vec<String>),
    Conventions(Vec<Convention>),
    Jtbd(Jtbd),
    JtbdDimensions(JtbdDimensions),
    ProgressForces(ProgressForces),
    PestelAnalysis(PestelAnalysis),
    PorterFiveForces(PorterFiveForces),
    BlueOceanStrategy(BlueOceanStrategy),
    IdeationHypotheses(Vec<IdeationHypothesis>),
    SelectedHypotheses(Vec<usize>),
    BusinessModels(Vec<BusinessModel>),
    FinalThesis(FinalThesis),
    UnicornScore(Option<f64>),
}

impl ThesisUpdate {
    /// The field this update replaces.
    pub fn field(&self) -> ThesisField {
        match self {
            Self::ExcavationDomain(_) => ThesisField::ExcavationDomain,
            Self::CreatorContext(_) => ThesisField::CreatorContext,
            Self::AmbitionLevel(_) => ThesisField::AmbitionLevel,
            Self::Domain(_) => ThesisField::Domain,
            Self::HumanNeed(_) => ThesisField::HumanNeed,
            Self::AiFeedback(_) => ThesisField::AiFeedback,
            Self::Truths(_) => ThesisField::Truths,
            Self::Conventions(_) => ThesisField::Conventions,
            Self::Jtbd(_) => ThesisField::Jtbd,
            Self::JtbdDimensions(_) => ThesisField::JtbdDimensions,
            Self::ProgressForces(_) => ThesisField::ProgressForces,
            Self::PestelAnalysis(_) => ThesisField::PestelAnalysis,
            Self::PorterFiveForces(_) => ThesisField::PorterFiveForces,
            Self::BlueOceanStrategy(_) => ThesisField::BlueOceanStrategy,
            Self::IdeationHypotheses(_) => ThesisField::IdeationHypotheses,
            Self::SelectedHypotheses(_) => ThesisField::SelectedHypotheses,
            Self::BusinessModels(_) => ThesisField::BusinessModels,
            Self::FinalThesis(_) => ThesisField::FinalThesis,
            Self::UnicornScore(_) => ThesisField::UnicornScore,
        }
    }

    /// Replace the named field of `thesis`, leaving every other field untouched.
    pub fn apply(self, thesis: &mut ThesisData) {
        match self {
            Self::ExcavationDomain(v) => thesis.excavation_domain = v,
            Self::CreatorContext(v) => thesis.creator_context = v,
            Self::AmbitionLevel(v) => thesis.ambition_level = v,
            Self::Domain(v) => thesis.domain = v,
            Self::HumanNeed(v) => thesis.human_need = v,
            Self::AiFeedback(v) => thesis.ai_feedback = v,
            Self::Truths(v) => thesis.truths = v,
            Self::Conventions(v) => thesis.conventions = v,
            Self::Jtbd(v) => thesis.jtbd = v,
            Self::JtbdDimensions(v) => thesis.jtbd_dimensions = v,
            Self::ProgressForces(v) => thesis.progress_forces = v,
            Self::PestelAnalysis(v) => thesis.pestel_analysis = v,
            Self::PorterFiveForces(v) => thesis.porter_five_forces = v,
            Self::BlueOceanStrategy(v) => thesis.blue_ocean_strategy = v,
            Self::IdeationHypotheses(v) => thesis.ideation_hypotheses = v,
            Self::SelectedHypotheses(v) => thesis.selected_hypotheses = v,
            Self::BusinessModels(v) => thesis.business_models = v,
            Self::FinalThesis(v) => thesis.final_thesis = v,
            Self::UnicornScore(v) => thesis.unicorn_score = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_names_match_wire_keys() {
        let json = serde_json::to_value(ThesisData {
            unicorn_score: Some(1.0),
            ..Default::default()
        })
        .unwrap();
        let object = json.as_object().unwrap();

        for field in ThesisField::ALL {
            assert!(object.contains_key(field.as_str()), "missing {}", field.as_str());
        }
        assert_eq!(object.len(), ThesisField::ALL.len());
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!(ThesisField::parse("porterFiveForces"), Some(ThesisField::PorterFiveForces));
        assert_eq!(ThesisField::parse("porter_five_forces"), None);

        let err = "porter_five_forces".parse::<ThesisField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown thesis field: porter_five_forces");
    }

    #[test]
    fn test_apply_replaces_only_named_field() {
        let mut thesis = ThesisData {
            domain: "before".to_string(),
            truths: vec!["kept".to_string()],
            ..Default::default()
        };
        let untouched = thesis.truths.clone();

        let update = ThesisUpdate::Domain("after".to_string());
        assert_eq!(update.field(), ThesisField::Domain);
        update.apply(&mut thesis);

        assert_eq!(thesis.domain, "after");
        assert_eq!(thesis.truths, untouched);
    }
}
