//! Output schema declaration and best-effort coercion of final replies.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ResponderError;
use crate::llm::{JsonSchemaFormat, ResponseFormat};

/// `response_format` asking the model for JSON matching `T`.
pub fn response_format_for<T: JsonSchema>() -> ResponseFormat {
    let schema = schemars::schema_for!(T);
    ResponseFormat::JsonSchema {
        json_schema: JsonSchemaFormat {
            name: T::schema_name().into_owned(),
            schema: schema.to_value(),
            strict: false,
        },
    }
}

/// Final model output once no more tools are requested.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalReply {
    Text(String),
    Structured(Value),
}

impl FinalReply {
    /// The reply as text; structured replies are rendered as compact JSON.
    pub fn into_text(self) -> String {
        match self {
            FinalReply::Text(text) => text,
            FinalReply::Structured(value) => value.to_string(),
        }
    }
}

/// Coerce a final reply into `T`.
///
/// Structured replies are deserialized directly. Text replies are parsed as
/// JSON after removing a surrounding Markdown code fence. On failure the raw
/// output is returned untouched inside [`ResponderError::ParseFailure`].
pub fn coerce<T: DeserializeOwned>(reply: FinalReply) -> Result<T, ResponderError> {
    match reply {
        FinalReply::Structured(value) => {
            serde_json::from_value(value.clone()).map_err(|e| ResponderError::ParseFailure {
                raw: value.to_string(),
                reason: e.to_string(),
            })
        }
        FinalReply::Text(text) => {
            serde_json::from_str(strip_code_fence(&text)).map_err(|e| ResponderError::ParseFailure {
                reason: e.to_string(),
                raw: text,
            })
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening line.
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => {
            let body = body.trim();
            body.strip_prefix("json").map_or(body, str::trim_start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct Finding {
        title: String,
        relevance: String,
    }

    #[test]
    fn text_json_is_parsed() {
        let finding: Finding =
            coerce(FinalReply::Text(r#"{"title": "doc A", "relevance": "matches X"}"#.to_string())).unwrap();
        assert_eq!(finding.title, "doc A");
        assert_eq!(finding.relevance, "matches X");
    }

    #[test]
    fn fenced_json_is_parsed() {
        let text = "```json\n{\"title\": \"t\", \"relevance\": \"r\"}\n```";
        let finding: Finding = coerce(FinalReply::Text(text.to_string())).unwrap();
        assert_eq!(finding.title, "t");
    }

    #[test]
    fn structured_reply_is_accepted_directly() {
        let finding: Finding =
            coerce(FinalReply::Structured(json!({"title": "t", "relevance": "r"}))).unwrap();
        assert_eq!(finding, Finding { title: "t".into(), relevance: "r".into() });
    }

    #[test]
    fn non_json_text_keeps_raw_verbatim() {
        let err = coerce::<Finding>(FinalReply::Text("not JSON".to_string())).unwrap_err();
        match err {
            ResponderError::ParseFailure { raw, .. } => assert_eq!(raw, "not JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_required_field_is_parse_failure() {
        let err = coerce::<Finding>(FinalReply::Structured(json!({"title": "t"}))).unwrap_err();
        assert!(matches!(err, ResponderError::ParseFailure { ref raw, .. } if raw == r#"{"title":"t"}"#));
    }

    #[test]
    fn fence_stripping_leaves_plain_text_alone() {
        assert_eq!(strip_code_fence("  plain  "), "plain");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```unterminated"), "```unterminated");
    }

    #[test]
    fn single_line_fence_with_language_tag() {
        assert_eq!(strip_code_fence("```json {\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```{\"a\": 1}```"), "{\"a\": 1}");

        let finding: Finding = coerce(FinalReply::Text(
            "```json {\"title\": \"t\", \"relevance\": \"r\"}```".to_string(),
        ))
        .unwrap();
        assert_eq!(finding.title, "t");
    }

    #[test]
    fn response_format_names_the_record() {
        let ResponseFormat::JsonSchema { json_schema } = response_format_for::<Finding>();
        assert_eq!(json_schema.name, "Finding");
        assert_eq!(json_schema.schema["properties"]["title"]["type"], json!("string"));
        assert!(!json_schema.strict);
    }
}
