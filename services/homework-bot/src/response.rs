//! Shape checks for decoded homework-status responses

use serde_json::Value;

use crate::HomeworkBotError;

pub const HOMEWORKS_KEY: &str = "homeworks";

/// Verify the response shape and return its `homeworks` array.
///
/// The response must be a non-empty JSON object whose `homeworks` value is an
/// array. The array is returned as-is, most recent submission first.
pub fn check_response(response: &Value) -> crate::Result<&Vec<Value>> {
    let object = response.as_object().ok_or_else(|| {
        HomeworkBotError::Shape(format!(
            "response is not a JSON object (got {})",
            json_type_name(response)
        ))
    })?;

    if object.is_empty() {
        return Err(HomeworkBotError::Shape("response is empty".to_string()));
    }

    let homeworks = object.get(HOMEWORKS_KEY).ok_or_else(|| {
        HomeworkBotError::Shape(format!("response has no '{}' key", HOMEWORKS_KEY))
    })?;

    homeworks.as_array().ok_or_else(|| {
        HomeworkBotError::Shape(format!(
            "'{}' is not an array (got {})",
            HOMEWORKS_KEY,
            json_type_name(homeworks)
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
