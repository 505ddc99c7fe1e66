//! Mapping of non-success answers onto [`ApiError`].

use pharmadesk_core::{FieldError, RuleCode};
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::ApiResponse;

/// Classify a non-success response. `label_field` is blamed for conflicts
/// the backend does not attribute to a field.
pub(crate) fn classify(response: &ApiResponse, label_field: &str) -> ApiError {
    let body: Value = serde_json::from_slice(&response.body).unwrap_or(Value::Null);
    let message = error_message(&body).unwrap_or_else(|| {
        String::from_utf8_lossy(&response.body).trim().to_string()
    });

    match response.status {
        409 => ApiError::Conflict {
            field: body
                .get("field")
                .and_then(Value::as_str)
                .unwrap_or(label_field)
                .to_string(),
            message: if message.is_empty() {
                "already exists".to_string()
            } else {
                message
            },
        },
        422 => match field_errors(&body) {
            Some(errors) if !errors.is_empty() => ApiError::Validation(errors),
            _ => ApiError::Transport {
                status: Some(422),
                message,
            },
        },
        status => ApiError::Transport {
            status: Some(status),
            message,
        },
    }
}

/// `{"detail": "..."}` or `{"error": "..."}`.
fn error_message(body: &Value) -> Option<String> {
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// `{"detail": [{"loc": ["body", "name"], "msg": "...", "type": "..."}]}`.
fn field_errors(body: &Value) -> Option<Vec<FieldError>> {
    let items = body.get("detail")?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| {
                let field = item
                    .get("loc")
                    .and_then(Value::as_array)
                    .and_then(|loc| loc.last())
                    .map(|last| match last {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_default();
                let message = item
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or("rejected by the server");
                FieldError::new(field, RuleCode::Server, message)
            })
            .collect(),
    )
}
