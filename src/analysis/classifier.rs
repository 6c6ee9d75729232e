use serde_json::{json, Value};
use thiserror::Error;

use crate::state::data::{AnalysisResult, Category};

/// Hosted multimodal model used for metadata extraction
const MODEL: &str = "gemini-3-flash-preview";

/// Fixed instruction prompt sent alongside the image
const PROMPT: &str = "你是一位资深的湖南湘绣艺术专家。请分析这张湘绣图片的画面内容，\
    并以JSON格式返回以下信息：作品名称(title)、所属分类(category - 必须是\
    \"动物\",\"花鸟\",\"人物\",\"山水\",\"其他\"之一)、作品简述(description)、\
    主要采用的湘绣针法(needlework)。";

/// Ways the advisory analysis call can fail.
///
/// None of these ever blocks manual record entry; the form stays editable
/// and submittable regardless.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Transport or HTTP-level failure talking to the classifier
    #[error("分析请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered but produced no candidate text
    #[error("分析服务未返回内容")]
    EmptyResponse,

    /// The candidate text did not match the four-field schema
    #[error("分析结果不符合约定格式: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Send a downscaled JPEG (already base64-encoded) to the classifier and
/// map its structured answer onto the record schema.
///
/// The caller is responsible for downsizing first (`resize::compress_upload`)
/// so the inline payload stays bounded.
pub async fn analyze_image(
    jpeg_base64: String,
    api_key: String,
) -> Result<AnalysisResult, AnalysisError> {
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
        MODEL
    );

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&request_body(&jpeg_base64))
        .send()
        .await?
        .error_for_status()?;

    let body: Value = response.json().await?;
    parse_response(&body)
}

/// Build the generateContent request: inline image + prompt, with the
/// response constrained to a JSON object of exactly the four fields.
fn request_body(jpeg_base64: &str) -> Value {
    let category_labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();

    json!({
        "contents": [{
            "parts": [
                {
                    "inline_data": {
                        "mime_type": "image/jpeg",
                        "data": jpeg_base64,
                    }
                },
                { "text": PROMPT },
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "category": { "type": "STRING", "enum": category_labels },
                    "description": { "type": "STRING" },
                    "needlework": { "type": "STRING" },
                },
                "required": ["title", "category", "description", "needlework"],
            }
        }
    })
}

/// Extract the first candidate's text and parse it against the schema
fn parse_response(response: &Value) -> Result<AnalysisResult, AnalysisError> {
    let text = response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or(AnalysisError::EmptyResponse)?;

    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }]
                }
            }]
        })
    }

    #[test]
    fn test_valid_payload_parses() {
        let text = r#"{"title":"金鱼","category":"动物","description":"池中游鱼","needlework":"掺针"}"#;
        let result = parse_response(&response_with_text(text)).unwrap();

        assert_eq!(result.title, "金鱼");
        assert_eq!(result.category, Category::Animals);
        assert_eq!(result.needlework, "掺针");
    }

    #[test]
    fn test_missing_needlework_fails_schema() {
        let text = r#"{"title":"金鱼","category":"动物","description":"池中游鱼"}"#;
        let err = parse_response(&response_with_text(text)).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
    }

    #[test]
    fn test_extra_field_fails_schema() {
        let text = r#"{"title":"a","category":"其他","description":"b","needlework":"c","mood":"calm"}"#;
        let err = parse_response(&response_with_text(text)).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
    }

    #[test]
    fn test_category_outside_enum_fails_schema() {
        let text = r#"{"title":"a","category":"刺绣","description":"b","needlework":"c"}"#;
        let err = parse_response(&response_with_text(text)).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
    }

    #[test]
    fn test_no_candidates_is_empty_response() {
        let err = parse_response(&json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResponse));
    }

    #[test]
    fn test_request_body_shape() {
        let body = request_body("QUFBQQ==");

        assert_eq!(
            body.pointer("/contents/0/parts/0/inline_data/data")
                .and_then(Value::as_str),
            Some("QUFBQQ==")
        );
        let required = body
            .pointer("/generationConfig/responseSchema/required")
            .unwrap();
        assert_eq!(required.as_array().unwrap().len(), 4);
    }
}
