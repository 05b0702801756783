use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thesis_core::{ThesisData, WizardStep};
use uuid::Uuid;
use wizard::{Draft, WizardSession};

/// A finished thesis written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisExport {
    pub session_id: Uuid,
    pub exported_at: DateTime<Utc>,
    /// Step the session was on; an unknown name resumes from the start.
    #[serde(default)]
    pub step: String,
    pub thesis_data: ThesisData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifesto: Option<String>,
}

impl ThesisExport {
    pub fn from_session(session: &WizardSession) -> Self {
        Self {
            session_id: session.id(),
            exported_at: Utc::now(),
            step: session.step().to_string(),
            thesis_data: session.thesis().clone(),
            manifesto: session.store().generated_manifesto().map(str::to_string),
        }
    }

    pub fn draft(&self) -> Draft<'_> {
        match &self.manifesto {
            Some(manifesto) => Draft::Generated {
                thesis: &self.thesis_data,
                manifesto,
            },
            None => Draft::Manual(&self.thesis_data),
        }
    }
}

/// Either an export written by this tool or a bare thesis document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThesisFile {
    Export(ThesisExport),
    Bare(ThesisData),
}

pub fn write_export(path: &Path, export: &ThesisExport) -> Result<()> {
    let json = serde_json::to_string_pretty(export)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_thesis_file(path: &Path) -> Result<ThesisExport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_thesis_file(&content).with_context(|| format!("Invalid thesis file {}", path.display()))
}

fn parse_thesis_file(content: &str) -> Result<ThesisExport> {
    let export = match serde_json::from_str(content)? {
        ThesisFile::Export(export) => export,
        ThesisFile::Bare(thesis_data) => ThesisExport {
            session_id: Uuid::nil(),
            exported_at: Utc::now(),
            step: WizardStep::default().to_string(),
            thesis_data,
            manifesto: None,
        },
    };
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wizard::{OfflineOracle, MANIFESTO_UNAVAILABLE};

    #[test]
    fn test_written_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thesis.json");
        let export = ThesisExport {
            session_id: Uuid::new_v4(),
            exported_at: Utc::now(),
            step: "summary".to_string(),
            thesis_data: OfflineOracle::sample_thesis(),
            manifesto: Some("# Generated".to_string()),
        };

        write_export(&path, &export).unwrap();
        let read = read_thesis_file(&path).unwrap();

        assert_eq!(read, export);
        assert_eq!(read.draft().render(), "# Generated");
    }

    #[test]
    fn test_bare_document_renders_manually() {
        let export = parse_thesis_file(r#"{"domain": "legal tech"}"#).unwrap();
        assert_eq!(export.thesis_data.domain, "legal tech");
        assert_eq!(export.step, "activation");
        assert_eq!(export.manifesto, None);
        assert_eq!(export.draft().render(), MANIFESTO_UNAVAILABLE);
    }

    #[test]
    fn test_export_resumes_session_at_saved_step() {
        let export = parse_thesis_file(
            r#"{
                "sessionId": "00000000-0000-0000-0000-000000000000",
                "exportedAt": "2026-01-01T00:00:00Z",
                "step": "porter",
                "thesisData": {"domain": "legal tech"}
            }"#,
        )
        .unwrap();

        let mut session = WizardSession::default();
        let step = session.resume(export.thesis_data, export.manifesto, &export.step);
        assert_eq!(step, WizardStep::Porter);
        assert_eq!(session.thesis().domain, "legal tech");
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(parse_thesis_file("\"not a thesis\"").is_err());
    }
}
