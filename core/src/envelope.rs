//! Decoding of the `{code, message, data}` response envelope.
//!
//! Every API response wraps its payload the same way:
//!
//! ```json
//! {"code": 0, "message": "ok", "data": {"groupID": "g.s8oes9dhwrvt0zif"}}
//! {"code": 1, "message": "groupID does not exist", "data": null}
//! ```
//!
//! A numeric `code` equal to zero (`0` or `0.0`) is success and yields
//! `data`. Anything else is an `Api` error. A body that is not UTF-8 JSON
//! holding a non-empty object is a `Protocol` error.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Decode a response body into the envelope's `data`.
///
/// Returns `Ok(None)` when `data` is absent or `null`.
pub fn decode(body: impl AsRef<[u8]>) -> Result<Option<Value>> {
    let body = body.as_ref();
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| Error::protocol(String::from_utf8_lossy(body)))?;
    let mut envelope = match value {
        Value::Object(map) if !map.is_empty() => map,
        other => return Err(Error::protocol(other.to_string())),
    };

    let code = envelope.get("code");
    if code.and_then(Value::as_f64) != Some(0.0) {
        return Err(Error::Api {
            code: code.and_then(integral_code),
            message: failure_message(&envelope),
        });
    }

    match envelope.remove("data") {
        None | Some(Value::Null) => Ok(None),
        Some(data) => Ok(Some(data)),
    }
}

/// `1` and `1.0` are the same code; `1.5` is no code at all.
fn integral_code(code: &Value) -> Option<i64> {
    code.as_i64().or_else(|| {
        code.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// The envelope's `message`, or the whole envelope when it has none.
fn failure_message(envelope: &Map<String, Value>) -> String {
    match envelope.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => Value::Object(envelope.clone()).to_string(),
    }
}
