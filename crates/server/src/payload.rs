//! Prediction payload handling: normalize, validate, coerce, reorder.
//!
//! Accepted bodies, each optionally wrapped as `{"payload": ...}`:
//!
//! ```json
//! {"GRE Score": 320, "TOEFL Score": 110, ...}
//! {"instances": [{"GRE Score": 320, ...}, {"GRE Score": 300, ...}]}
//! ```

use pipeline_facade::FeatureMatrix;
use serde_json::{Map, Value};

use crate::error::ApiError;

pub type Record = Map<String, Value>;

const PAYLOAD_KEY: &str = "payload";
const INSTANCES_KEY: &str = "instances";

/// Unwrap an optional `payload` key.
pub fn unwrap_payload(body: Value) -> Result<Record, ApiError> {
    let Value::Object(mut object) = body else {
        return Err(ApiError::BadRequest(
            "request body must be a JSON object".to_string(),
        ));
    };
    match object.remove(PAYLOAD_KEY) {
        Some(Value::Object(inner)) => Ok(inner),
        Some(_) => Err(ApiError::BadRequest(
            "'payload' must be a JSON object".to_string(),
        )),
        None => Ok(object),
    }
}

/// Turn a request body into a list of records.
pub fn normalize(body: Value) -> Result<Vec<Record>, ApiError> {
    let mut object = unwrap_payload(body)?;
    let Some(instances) = object.remove(INSTANCES_KEY) else {
        return Ok(vec![object]);
    };

    let rows = match instances {
        Value::Array(rows) if !rows.is_empty() => rows,
        _ => {
            return Err(ApiError::BadRequest(
                "instances must be a non-empty list".to_string(),
            ))
        }
    };
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(record) => Ok(record),
            _ => Err(ApiError::BadRequest(format!(
                "instance {} must be a JSON object",
                i
            ))),
        })
        .collect()
}

/// Features absent from at least one record, in `features` order.
pub fn missing_features<'a>(records: &[Record], features: &'a [String]) -> Vec<&'a str> {
    features
        .iter()
        .filter(|f| records.iter().any(|r| !r.contains_key(f.as_str())))
        .map(String::as_str)
        .collect()
}

/// Numeric value of a JSON cell. Booleans count as 1/0; numeric strings are parsed.
pub fn coerce(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    number.filter(|v| v.is_finite())
}

/// Validate every record and lay them out in `features` order.
///
/// Extra keys are ignored.
pub fn to_matrix(records: &[Record], features: &[String]) -> Result<FeatureMatrix, ApiError> {
    let missing = missing_features(records, features);
    if !missing.is_empty() {
        return Err(ApiError::BadRequest(format!("Missing columns: {:?}", missing)));
    }

    let mut data = Vec::with_capacity(records.len() * features.len());
    for (i, record) in records.iter().enumerate() {
        for feature in features {
            let value = &record[feature.as_str()];
            let number = coerce(value).ok_or_else(|| {
                ApiError::Unprocessable(format!(
                    "Feature '{}' in record {} is not numeric: {}",
                    feature, i, value
                ))
            })?;
            data.push(number);
        }
    }
    FeatureMatrix::new(data, records.len(), features.len())
        .map_err(|e| ApiError::Internal(e.to_string()))
}
