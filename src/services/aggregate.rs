//! Sums the integers and string lengths of a mixed JSON array.
//!
//! Input is `{"data": [<string|integer>, ...]}`, output is
//! `{"string_len": n, "int_sum": n}`. Anything in `data` that is not a string
//! or an integer is rejected rather than coerced.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// One element of [`InputRecord::data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(i64),
}

impl TryFrom<JsonValue> for Value {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::String(s) => Ok(Value::Text(s)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Number(i)),
                None if n.is_u64() => Err(Error::invalid_input(format!(
                    "integer {n} is out of range"
                ))),
                // integer literals beyond u64 arrive as whole floats
                None if n.as_f64().is_some_and(is_out_of_range_integer) => {
                    Err(Error::invalid_input(format!(
                        "integer {:.0} is out of range",
                        n.as_f64().unwrap_or_default()
                    )))
                }
                None => Err(Error::invalid_input(format!(
                    "expected a string or an integer, found float {n}"
                ))),
            },
            other => Err(Error::invalid_input(format!(
                "expected a string or an integer, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = JsonValue::deserialize(deserializer)?;
        Value::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub data: Vec<Value>,
}

impl InputRecord {
    pub fn new(data: Vec<Value>) -> Self {
        Self { data }
    }

    /// Parses `{"data": [...]}` from a JSON string.
    ///
    /// Syntax errors surface as [`Error::Json`]; a well-formed document with
    /// the wrong shape surfaces as [`Error::InvalidInput`].
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: JsonValue) -> Result<Self> {
        let mut object = match value {
            JsonValue::Object(object) => object,
            other => {
                return Err(Error::invalid_input(format!(
                    "expected an object with a `data` array, found {}",
                    json_kind(&other)
                )))
            }
        };

        let items = match object.remove("data") {
            Some(JsonValue::Array(items)) => items,
            Some(other) => {
                return Err(Error::invalid_input(format!(
                    "`data` must be an array, found {}",
                    json_kind(&other)
                )))
            }
            None => return Err(Error::invalid_input("missing field `data`")),
        };

        let data = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Value::try_from(item).map_err(|err| match err {
                    Error::InvalidInput { reason } => {
                        Error::invalid_input(format!("data[{index}]: {reason}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { data })
    }

    pub fn aggregate(&self) -> Result<OutputRecord> {
        aggregate(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub string_len: u64,
    pub int_sum: i64,
}

/// Adds up the character length of every text value and the value of every
/// number.
pub fn aggregate(input: &InputRecord) -> Result<OutputRecord> {
    input
        .data
        .iter()
        .try_fold(OutputRecord::default(), |acc, value| -> Result<OutputRecord> {
            match value {
                Value::Text(s) => Ok(OutputRecord {
                    string_len: acc.string_len + s.chars().count() as u64,
                    ..acc
                }),
                Value::Number(i) => Ok(OutputRecord {
                    int_sum: acc.int_sum.checked_add(*i).ok_or(Error::Overflow)?,
                    ..acc
                }),
            }
        })
}

fn is_out_of_range_integer(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && (f < i64::MIN as f64 || f >= i64::MAX as f64)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
