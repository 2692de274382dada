use serde_json::Value;

use crate::error::{PlanError, Result};

/// Top-level JSON shape expected in a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Object => ('{', '}'),
            JsonShape::Array => ('[', ']'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            JsonShape::Object => value.is_object(),
            JsonShape::Array => value.is_array(),
        }
    }
}

/// Locate and parse the JSON payload embedded in generated text.
///
/// The span from the first opening delimiter to the last closing one is
/// tried first, which strips prose and markdown fences around the payload.
/// The whole text is tried second. Anything else is a malformed response.
pub fn extract_json(text: &str, shape: JsonShape) -> Result<Value> {
    let (open, close) = shape.delimiters();

    if let (Some(start), Some(end)) = (text.find(open), text.rfind(close)) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&text[start..=end]) {
                if shape.matches(&value) {
                    return Ok(value);
                }
            }
        }
    }

    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value) if shape.matches(&value) => Ok(value),
        Ok(_) => Err(PlanError::MalformedResponse(format!(
            "expected a JSON {:?}",
            shape
        ))),
        Err(e) => Err(PlanError::MalformedResponse(format!(
            "no parseable JSON in response: {}",
            e
        ))),
    }
}

/// First `limit` characters of `text`, for log previews.
pub fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
