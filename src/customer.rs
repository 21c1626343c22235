use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::geo::GeoPoint;

pub const USER_ID: &str = "user_id";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("customer record has no '{field}' field")]
    MissingField { field: &'static str },

    #[error("customer field '{field}' has unusable value {value}")]
    InvalidField { field: &'static str, value: String },
}

/// One customer record. Fields other than `user_id`, `latitude` and `longitude`
/// are carried through untouched, in their original order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customer(Map<String, Value>);

impl Customer {
    #[cfg(test)]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    #[cfg(test)]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn field(&self, field: &'static str) -> Result<&Value, RecordError> {
        self.0.get(field).ok_or(RecordError::MissingField { field })
    }

    /// `user_id` must be a JSON integer.
    pub fn user_id(&self) -> Result<i64, RecordError> {
        let value = self.field(USER_ID)?;
        value.as_i64().ok_or_else(|| RecordError::InvalidField {
            field: USER_ID,
            value: value.to_string(),
        })
    }

    pub fn location(&self) -> Result<GeoPoint, RecordError> {
        Ok(GeoPoint::new(
            self.coordinate(LATITUDE)?,
            self.coordinate(LONGITUDE)?,
        ))
    }

    // Coordinates arrive either as JSON numbers or as decimal strings.
    fn coordinate(&self, field: &'static str) -> Result<f64, RecordError> {
        let value = self.field(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|v| v.is_finite())
            .ok_or_else(|| RecordError::InvalidField {
                field,
                value: value.to_string(),
            })
    }
}
