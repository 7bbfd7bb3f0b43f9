//! Schema validation helpers – compiled into WASM.

use jsonschema::JSONSchema;
use lazy_static::lazy_static;
use serde_json::Value;

lazy_static! {
    static ref FRAME_SCHEMA: JSONSchema = {
        // At compile-time embed the schema JSON string.
        let raw = include_str!("schema/event_frame_schema.json");
        let parsed: Value = serde_json::from_str(raw)
            .expect("Event frame JSON schema must be valid JSON");
        JSONSchema::compile(&parsed).expect("valid event frame schema")
    };
}

/// Validate a value against the *EventFrame* schema.
/// Returns `true` when valid, `false` otherwise.
pub fn validate_frame(value: &Value) -> bool {
    FRAME_SCHEMA.is_valid(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_named_event_with_any_payload() {
        assert!(validate_frame(&json!({"event": "room_list", "data": ["General"]})));
        assert!(validate_frame(&json!({"event": "user_typing", "data": "bob"})));
    }

    #[test]
    fn rejects_malformed_frames() {
        assert!(!validate_frame(&json!(["receive_message", {}])));
        assert!(!validate_frame(&json!({"event": "", "data": null})));
        assert!(!validate_frame(&json!({"event": "room_list"})));
        assert!(!validate_frame(&json!({"event": 7, "data": []})));
    }
}
