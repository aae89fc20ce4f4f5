use serde::Serialize;
use serde_json::Value;

pub const SAFETY_CATEGORY: &str = "HARM_CATEGORY_DANGEROUS_CONTENT";
pub const SAFETY_THRESHOLD: &str = "BLOCK_NONE";
const MODEL_PATH_PREFIX: char = '/';

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct SafetySetting<'a> {
    category: &'a str,
    threshold: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRequest<'a> {
    contents: [Content<'a>; 1],
    safety_settings: [SafetySetting<'a>; 1],
}

/// Single-turn generate-content request body for `prompt`.
pub fn create_request(prompt: &str) -> Value {
    let request = GoogleRequest {
        contents: [Content {
            role: "user",
            parts: [TextPart { text: prompt }],
        }],
        safety_settings: [SafetySetting {
            category: SAFETY_CATEGORY,
            threshold: SAFETY_THRESHOLD,
        }],
    };
    serde_json::to_value(request).unwrap_or(Value::Null)
}

/// Text of the first candidate, parts joined by newlines and trimmed.
/// `None` when the response carries no text at all.
pub fn response_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())?;

    let text = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Message for a non-success response: `error.message` from the body when
/// present, else the status reason phrase.
pub fn error_message(body: &str, reason: Option<&str>) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .or_else(|| reason.filter(|r| !r.is_empty()).map(str::to_string))
        .unwrap_or_else(|| "Gemini request failed".to_string())
}

/// Model names from a list response with the `models/` prefix removed.
pub fn model_names(response: &Value) -> Vec<String> {
    response
        .get("models")
        .and_then(|v| v.as_array())
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m.get("name").and_then(|v| v.as_str()))
                .map(|name| {
                    name.split(MODEL_PATH_PREFIX)
                        .next_back()
                        .unwrap_or(name)
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_shape() {
        let request = create_request("Pitch this");
        assert_eq!(
            request,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [{"text": "Pitch this"}]
                }],
                "safetySettings": [{
                    "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                    "threshold": "BLOCK_NONE"
                }]
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "  Introduction"},
                        {"inlineData": {"mimeType": "image/png", "data": ""}},
                        {"text": "Hi everyone  "}
                    ]
                }
            }]
        });
        assert_eq!(
            response_text(&response),
            Some("Introduction\nHi everyone".to_string())
        );
    }

    #[test]
    fn test_response_text_only_reads_first_candidate() {
        let response = json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        });
        assert_eq!(response_text(&response), Some("first".to_string()));
    }

    #[test]
    fn test_response_text_missing_or_blank() {
        assert_eq!(response_text(&json!({})), None);
        assert_eq!(response_text(&json!({"candidates": []})), None);
        assert_eq!(
            response_text(&json!({"candidates": [{"finishReason": "SAFETY"}]})),
            None
        );
        assert_eq!(
            response_text(&json!({"candidates": [{"content": {"parts": [{"text": "  \n "}]}}]})),
            None
        );
    }

    #[test]
    fn test_error_message_prefers_body() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body, Some("Bad Request")), "API key not valid.");
        assert_eq!(error_message("<html>", Some("Not Found")), "Not Found");
        assert_eq!(error_message("{}", None), "Gemini request failed");
    }

    #[test]
    fn test_model_names_strip_path_prefix() {
        let response = json!({
            "models": [
                {"name": "models/gemini-1.5-flash-002", "displayName": "Gemini 1.5 Flash"},
                {"name": "models/gemini-1.5-flash-001"},
                {"displayName": "nameless"},
                {"name": "gemini-pro"}
            ]
        });
        assert_eq!(
            model_names(&response),
            vec!["gemini-1.5-flash-002", "gemini-1.5-flash-001", "gemini-pro"]
        );
        assert!(model_names(&json!({})).is_empty());
    }
}
