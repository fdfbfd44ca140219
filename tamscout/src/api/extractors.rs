use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::ScoutError;

/// `axum::Json` whose rejections come back in the v1 error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ScoutError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for ScoutError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> ScoutError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                ScoutError::Validation(format!("Missing required field: {field}"))
            } else {
                ScoutError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            ScoutError::Validation(format!("JSON syntax error: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ScoutError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            ScoutError::Internal("Failed to read request body".to_string())
        }
        _ => ScoutError::Validation(rejection.to_string()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_missing_field_name() {
        assert_eq!(
            extract_missing_field("Failed to deserialize: missing field `cities` at line 1"),
            Some("cities")
        );
        assert_eq!(extract_missing_field("expected a string"), None);
    }
}
