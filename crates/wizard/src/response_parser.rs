use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::Result;

pub struct ResponseParser;

impl ResponseParser {
    /// Pull the JSON object out of a model response.
    ///
    /// A response that is already one valid JSON object is taken whole, so
    /// fences quoted inside its strings are left alone. Otherwise a ```json
    /// fence wins, then a bare fence holding an object, then the outermost
    /// `{...}` span, then the raw text.
    pub fn extract_json_from_response(content: &str) -> &str {
        let trimmed = content.trim();
        if trimmed.starts_with('{') && serde_json::from_str::<IgnoredAny>(trimmed).is_ok() {
            return trimmed;
        }

        if let Some(body) = Self::fenced_body(content, "```json") {
            return body;
        }

        if let Some(body) = Self::fenced_body(content, "```") {
            if body.starts_with('{') {
                return body;
            }
        }

        if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
            if start < end {
                return &content[start..=end];
            }
        }

        content.trim()
    }

    fn fenced_body<'a>(content: &'a str, opening: &str) -> Option<&'a str> {
        let start = content.find(opening)? + opening.len();
        let rest = &content[start..];
        let end = rest.find("```")?;
        Some(rest[..end].trim())
    }

    pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T> {
        let json = Self::extract_json_from_response(content);
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extract_from_json_fence() {
        let content = "Here you go:\n```json\n{\"a\": 1}\n```\nEnjoy.";
        assert_eq!(ResponseParser::extract_json_from_response(content), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_from_plain_fence() {
        let content = "```\n{\"a\": 2}\n```";
        assert_eq!(ResponseParser::extract_json_from_response(content), "{\"a\": 2}");
    }

    #[test]
    fn test_extract_from_surrounding_prose() {
        let content = "Sure! {\"a\": {\"b\": 3}} Hope that helps.";
        assert_eq!(
            ResponseParser::extract_json_from_response(content),
            "{\"a\": {\"b\": 3}}"
        );
    }

    #[test]
    fn test_unclosed_fence_falls_back_to_braces() {
        let content = "```json\n{\"a\": 4}";
        assert_eq!(ResponseParser::extract_json_from_response(content), "{\"a\": 4}");
    }

    #[test]
    fn test_bare_object_keeps_fences_inside_strings() {
        let content = r#"{"thesisData": {"domain": "ui"}, "manifesto": "Theme:\n```json\n{\"theme\": \"dark\"}\n```\nDone."}"#;
        assert_eq!(ResponseParser::extract_json_from_response(content), content);

        let parsed: Value = ResponseParser::parse_json(&format!("\n {content} \n")).unwrap();
        assert_eq!(parsed["thesisData"]["domain"], "ui");
        assert!(parsed["manifesto"].as_str().unwrap().contains("```json"));
    }

    #[test]
    fn test_parse_json_reports_invalid_payload() {
        let parsed: Value = ResponseParser::parse_json("```json\n{\"ok\": true}\n```").unwrap();
        assert_eq!(parsed["ok"], Value::Bool(true));

        let err = ResponseParser::parse_json::<Value>("no json here").unwrap_err();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
