//! Payload envelope codec
//!
//! Outbound payloads travel as base64-encoded UTF-8 JSON; processed files
//! come back in the same envelope. [`decode_processed_file`] is the exact
//! inverse of [`encode_payload`] for JSON objects.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use vaultdetect_domain::{DetectError, ProcessedResult, Result};

/// Encode a caller payload into the base64 file envelope.
///
/// Accepts a JSON object, or a string that parses to one.
///
/// # Errors
/// - [`DetectError::EmptyPayload`] for `null`
/// - [`DetectError::BadPayload`] for anything that is not a JSON object
pub fn encode_payload(payload: &Value) -> Result<String> {
    let object = coerce_object(payload)?;
    let json = serde_json::to_vec(&object)
        .map_err(|err| DetectError::BadPayload(format!("{payload} ({err})")))?;
    Ok(STANDARD.encode(json))
}

/// Decode a `processed_file` field back into a JSON object.
///
/// # Errors
/// - [`DetectError::MissingProcessedFile`] when the field is absent or blank
/// - [`DetectError::Decode`] when the content is not base64 or not a JSON
///   object
pub fn decode_processed_file(encoded: Option<&str>) -> Result<ProcessedResult> {
    let encoded = match encoded.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(DetectError::MissingProcessedFile),
    };

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|err| DetectError::Decode(format!("invalid base64: {err}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|err| DetectError::Decode(format!("invalid JSON object: {err}")))
}

fn coerce_object(payload: &Value) -> Result<ProcessedResult> {
    match payload {
        Value::Null => Err(DetectError::EmptyPayload),
        Value::Object(map) => Ok(map.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(DetectError::BadPayload(text.clone())),
        },
        other => Err(DetectError::BadPayload(other.to_string())),
    }
}
