//! Canonical JSON for DataStorage values.
//!
//! Game clients send and receive plain JSON. `Value` maps onto it directly,
//! except for floats JSON cannot carry:
//!
//! | Value | JSON Representation |
//! |-------|---------------------|
//! | NaN | `{"$f64": "NaN"}` |
//! | +Infinity | `{"$f64": "+Inf"}` |
//! | -Infinity | `{"$f64": "-Inf"}` |
//! | -0.0 | `{"$f64": "-0.0"}` |
//!
//! The `canonical*` submodules plug into `#[serde(with = ...)]` on command
//! and output fields.

use std::collections::{BTreeMap, HashMap};

use datastorage_core::Value;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Convert a Value to a JSON value with special float encoding.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::Number((*i).into()),
        Value::Float(f) => float_to_json(*f),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
        Value::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert a JSON value to a Value, recognizing `$f64` encodings.
///
/// Integers that fit `i64` become `Int`; every other number becomes `Float`.
pub fn json_to_value(json: &JsonValue) -> Result<Value, String> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(format!("unrepresentable number: {}", n))
            }
        }
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Array(items) => items
            .iter()
            .map(json_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        JsonValue::Object(obj) => {
            if obj.len() == 1 {
                if let Some(JsonValue::String(s)) = obj.get("$f64") {
                    return special_float_from_str(s).map(Value::Float);
                }
            }
            obj.iter()
                .map(|(k, v)| json_to_value(v).map(|val| (k.clone(), val)))
                .collect::<Result<HashMap<_, _>, _>>()
                .map(Value::Object)
        }
    }
}

fn float_to_json(f: f64) -> JsonValue {
    if f.is_nan() {
        serde_json::json!({"$f64": "NaN"})
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            serde_json::json!({"$f64": "+Inf"})
        } else {
            serde_json::json!({"$f64": "-Inf"})
        }
    } else if f == 0.0 && f.is_sign_negative() {
        serde_json::json!({"$f64": "-0.0"})
    } else {
        serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or_else(|| serde_json::json!({"$f64": f.to_string()}))
    }
}

fn special_float_from_str(s: &str) -> Result<f64, String> {
    match s {
        "NaN" => Ok(f64::NAN),
        "+Inf" => Ok(f64::INFINITY),
        "-Inf" => Ok(f64::NEG_INFINITY),
        "-0.0" => Ok(-0.0_f64),
        other => other
            .parse::<f64>()
            .map_err(|e| format!("invalid $f64 '{}': {}", other, e)),
    }
}

/// A Value that serializes as canonical JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalValue(pub Value);

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        value_to_json(&self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CanonicalValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        json_to_value(&json)
            .map(CanonicalValue)
            .map_err(de::Error::custom)
    }
}

impl From<Value> for CanonicalValue {
    fn from(v: Value) -> Self {
        CanonicalValue(v)
    }
}

impl From<CanonicalValue> for Value {
    fn from(v: CanonicalValue) -> Self {
        v.0
    }
}

/// `#[serde(with)]` adapter for a `Value` field
pub mod canonical {
    use super::*;

    /// Serialize as canonical JSON
    pub fn serialize<S: Serializer>(value: &Value, serializer: S) -> Result<S::Ok, S::Error> {
        value_to_json(value).serialize(serializer)
    }

    /// Deserialize from canonical JSON
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        CanonicalValue::deserialize(deserializer).map(Value::from)
    }
}

/// `#[serde(with)]` adapter for an `Option<Value>` field
///
/// A JSON `null` reads back as `Some(Value::Null)`; only an absent field is
/// `None`. Pair with `#[serde(default)]`.
pub mod canonical_option {
    use super::*;

    /// Serialize as canonical JSON, `None` as `null`
    pub fn serialize<S: Serializer>(
        value: &Option<Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => value_to_json(value).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize a present field as `Some`
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Value>, D::Error> {
        CanonicalValue::deserialize(deserializer).map(|v| Some(v.0))
    }
}

/// `#[serde(with)]` adapter for a key → `Value` map
pub mod canonical_map {
    use super::*;

    /// Serialize as a JSON object of canonical values
    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let obj: serde_json::Map<String, JsonValue> = map
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect();
        obj.serialize(serializer)
    }

    /// Deserialize from a JSON object of canonical values
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Value>, D::Error> {
        let raw = BTreeMap::<String, CanonicalValue>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|(k, v)| (k, v.0)).collect())
    }
}
