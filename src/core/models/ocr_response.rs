use serde_json::Value;

use crate::core::errors::UploadError;
use crate::global_constants;

/// Body returned by both `/api/ocr/*` endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl OcrResponse {
    /// Classifies a 2xx body. Anything that is not valid JSON counts as a
    /// failed response without error text. Fields of an unexpected type are
    /// ignored rather than failing the whole body.
    pub fn parse_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(parsed) => Self::from_value(&parsed),
            Err(e) => {
                log::warn!("[OCR_RESPONSE] Response body is not JSON: {}", e);
                Self::default()
            }
        }
    }

    fn from_value(parsed: &Value) -> Self {
        Self {
            success: parsed.get("success") == Some(&Value::Bool(true)),
            data: parsed.get("data").cloned(),
            error: parsed
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    pub fn into_outcome(self) -> Result<Value, UploadError> {
        if self.success {
            return Ok(self.data.unwrap_or(Value::Null));
        }

        let message = self
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| global_constants::USER_MESSAGE_UNKNOWN_ERROR.to_string());
        Err(UploadError::BackendLogical(message))
    }

    /// Extracts the `error` text from a non-2xx body, if it carries one.
    pub fn error_text_from_failure_body(body: &str) -> Option<String> {
        let parsed: Value = serde_json::from_str(body).ok()?;
        parsed
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
    }
}
