//! Response envelope parsing and result-code interpretation.
//!
//! Every pCloud API response is a JSON object with an integer `result`
//! field. Zero means success; anything else comes with an `error` string.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, Error};

/// Key of the numeric result code.
pub const RESULT_KEY: &str = "result";

/// Key of the error text on failures.
pub const ERROR_KEY: &str = "error";

/// Error text used when a failure carries no `error` field.
const UNKNOWN_ERROR: &str = "Unknown error";

/// A parsed JSON response object.
///
/// On success this is the full response, `result` field included. A
/// tolerated not-found failure yields [`Payload::empty`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// An empty payload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if the body is not a JSON object.
    pub fn from_slice(route: &str, body: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::malformed(route, format!("invalid JSON: {}", e)))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::malformed(
                route,
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the numeric result code, if present.
    pub fn result(&self) -> Option<i64> {
        self.0.get(RESULT_KEY).and_then(Value::as_i64)
    }

    /// Returns a string field or a malformed-response error naming it.
    pub fn str_field(&self, route: &str, key: &str) -> Result<&str, Error> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::malformed(route, format!("missing string field '{}'", key)))
    }

    /// Deserialize the payload into a typed response.
    pub fn decode<T: DeserializeOwned>(&self, route: &str) -> Result<T, Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| Error::malformed(route, e.to_string()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Interpret the result code of a parsed response.
///
/// - `result == 0`: the payload is returned unchanged.
/// - non-zero with `tolerate_not_found` and error text containing
///   "not found": an empty payload is returned.
/// - otherwise: [`Error::Api`] carrying route, method, code and text.
pub fn interpret(
    route: &str,
    method: &str,
    payload: Payload,
    tolerate_not_found: bool,
) -> Result<Payload, Error> {
    let code = match payload.get(RESULT_KEY) {
        Some(value) => value.as_i64().ok_or_else(|| {
            Error::malformed(route, format!("'{}' is not an integer", RESULT_KEY))
        })?,
        None => {
            return Err(Error::malformed(
                route,
                format!("missing '{}' field", RESULT_KEY),
            ));
        }
    };

    if code == 0 {
        return Ok(payload);
    }

    let message = payload
        .get(ERROR_KEY)
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ERROR);
    let error = ApiError::new(route, method, code, message);

    if tolerate_not_found && error.is_not_found() {
        return Ok(Payload::empty());
    }

    Err(error.into())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        Payload::from_slice("test", value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn success_returns_full_payload() {
        let p = payload(json!({"result": 0, "auth": "TOKEN123"}));
        let out = interpret("userinfo", "GET", p.clone(), false).unwrap();
        assert_eq!(out, p);
        assert_eq!(out.str_field("userinfo", "auth").unwrap(), "TOKEN123");
    }

    #[test]
    fn not_found_tolerated_when_opted_in() {
        let p = payload(json!({"result": 2009, "error": "File not found"}));
        let out = interpret("stat", "GET", p, true).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn not_found_raised_without_opt_in() {
        let p = payload(json!({"result": 2009, "error": "File not found"}));
        let err = interpret("stat", "GET", p, false).unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.code, 2009);
                assert_eq!(api.route, "stat");
                assert_eq!(api.method, "GET");
                assert_eq!(api.message, "File not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn tolerance_only_covers_not_found() {
        let p = payload(json!({"result": 2094, "error": "Invalid 'access_token' provided."}));
        let err = interpret("stat", "GET", p, true).unwrap_err();
        assert_eq!(err.api_code(), Some(2094));
    }

    #[test]
    fn missing_error_text_uses_placeholder() {
        let p = payload(json!({"result": 5000}));
        let err = interpret("listfolder", "GET", p, false).unwrap_err();
        assert!(err.to_string().contains("Unknown error"));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = Payload::from_slice("gettextfile", b"this isnt json").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { ref route, .. } if route == "gettextfile"));
    }

    #[test]
    fn non_object_json_is_malformed() {
        let err = Payload::from_slice("stat", b"[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn missing_result_is_malformed() {
        let p = payload(json!({"Error": "Path not found or not accessible!"}));
        let err = interpret("stat", "GET", p, true).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn decode_typed_payload() {
        #[derive(Deserialize)]
        struct Digest {
            digest: String,
        }
        let p = payload(json!({"result": 0, "digest": "abc"}));
        let digest: Digest = p.decode("getdigest").unwrap();
        assert_eq!(digest.digest, "abc");
        assert!(p.decode::<Digest>("getdigest").is_ok());
        assert!(payload(json!({"result": 0})).decode::<Digest>("getdigest").is_err());
    }
}
