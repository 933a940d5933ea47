use serde_json::Value;

/// Extract a clean error message from a backend error body
///
/// The backend answers failures in several shapes:
/// `{"status": "error", "message": "Insufficient funds"}`,
/// `{"detail": "Not found."}` or field errors such as
/// `{"amount": ["Ensure this value is greater than or equal to 0.01."]}`.
///
/// Returns only the meaningful message, e.g. "Insufficient funds" or
/// "amount: Ensure this value is greater than or equal to 0.01.".
/// Bodies that are not JSON are returned trimmed.
pub fn extract_clean_error(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(json) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };

    for key in ["message", "detail", "error"] {
        if let Some(msg) = json.get(key).and_then(Value::as_str) {
            return msg.to_string();
        }
    }

    if let Some(fields) = json.as_object() {
        let messages: Vec<String> = fields
            .iter()
            .filter_map(|(field, value)| {
                let first = match value {
                    Value::Array(items) => items.first().and_then(Value::as_str),
                    Value::String(s) => Some(s.as_str()),
                    _ => None,
                }?;
                if field == "non_field_errors" {
                    Some(first.to_string())
                } else {
                    Some(format!("{}: {}", field, first))
                }
            })
            .collect();

        if !messages.is_empty() {
            return messages.join("; ");
        }
    }

    trimmed.to_string()
}
