//! Contract trait: canonical interchange for every record type.
//!
//! A contract is an immutable value object that round-trips through the
//! canonical JSON representation: `T::from_value(x.to_value()?) == x` for
//! every valid `x`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ContractResult, ValidationError};

/// Marker + interchange interface for contract records.
///
/// Implementations are expected to be flat, validated data structures with
/// value semantics (field-by-field equality, no identity). Construction from
/// untyped input goes through [`Contract::from_value`] and fails with a
/// [`ValidationError`] instead of coercing.
pub trait Contract: Serialize + DeserializeOwned + Clone + PartialEq + core::fmt::Debug {
    /// Build a record from the canonical interchange representation.
    fn from_value(value: Value) -> ContractResult<Self> {
        let result = serde_json::from_value(value).map_err(|e| classify(&e));
        if let Err(err) = &result {
            tracing::debug!(%err, "contract validation failed");
        }
        result
    }

    /// Build a record from a canonical JSON document.
    fn from_json(input: &str) -> ContractResult<Self> {
        let result = serde_json::from_str(input).map_err(|e| classify(&e));
        if let Err(err) = &result {
            tracing::debug!(%err, "contract validation failed");
        }
        result
    }

    /// Canonical interchange representation of this record.
    fn to_value(&self) -> ContractResult<Value> {
        serde_json::to_value(self).map_err(|e| ValidationError::type_mismatch("$", e.to_string()))
    }

    /// Canonical JSON document for this record.
    fn to_json(&self) -> ContractResult<String> {
        serde_json::to_string(self).map_err(|e| ValidationError::type_mismatch("$", e.to_string()))
    }
}

/// Map a decode failure onto the contract error model.
///
/// The decoder reports missing fields and unknown enum variants by name;
/// failures raised by nested validated types arrive as `"<field>: <reason>"`
/// messages and keep their field path. Everything else becomes a
/// [`ValidationError::TypeMismatch`] rooted at `$`.
fn classify(err: &serde_json::Error) -> ValidationError {
    let mut msg = err.to_string();
    // from_json failures carry a trailing position marker.
    if let Some(idx) = msg.find(" at line ") {
        msg.truncate(idx);
    }

    if let Some(field) = backtick_arg(&msg, "missing field `") {
        return ValidationError::missing_field(field);
    }

    if let Some(value) = backtick_arg(&msg, "unknown variant `") {
        let expected = msg
            .split_once("expected ")
            .map(|(_, tail)| tail.to_string())
            .unwrap_or_else(|| "variant".to_string());
        return ValidationError::out_of_domain("$", value, expected);
    }

    if let Some((field, reason)) = msg.split_once(": ") {
        if is_field_path(field) {
            return ValidationError::type_mismatch(field, reason);
        }
    }

    ValidationError::type_mismatch("$", msg)
}

fn backtick_arg<'a>(msg: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = msg.strip_prefix(prefix)?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}

fn is_field_path(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '[' | ']'))
}
