use serde_json::{Map, Value};
use thiserror::Error;

/// Raw JSON object returned by the upstream API for a single report.
pub type ReadingPayload = Map<String, Value>;

/// A usage figure, its price and the upstream timestamp identifying it.
///
/// Each field is `None` when upstream sent the key with a null or unusable
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub total: Option<f64>,
    pub price: Option<f64>,
    pub timestamp: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadingError {
    #[error("missing key `{0}`")]
    MissingKey(&'static str),
}

impl Reading {
    /// Extracts `total`, `price` and `timestamp` from an upstream payload.
    ///
    /// Only an absent key is an error. Numbers given as strings are parsed;
    /// other values become `None`. The timestamp is kept verbatim: strings
    /// as-is, null as `None`, anything else in its JSON form. It is only ever
    /// compared for equality.
    pub fn from_payload(payload: &ReadingPayload) -> Result<Self, ReadingError> {
        let total = numeric_value(field(payload, "total")?);
        let price = numeric_value(field(payload, "price")?);
        let timestamp = match field(payload, "timestamp")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };

        Ok(Self {
            total,
            price,
            timestamp,
        })
    }
}

fn field<'a>(payload: &'a ReadingPayload, key: &'static str) -> Result<&'a Value, ReadingError> {
    payload.get(key).ok_or(ReadingError::MissingKey(key))
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
