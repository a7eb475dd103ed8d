//! Catalog data contracts.
//!
//! Raw rows are decoded leniently: coordinate fields stay as raw JSON values
//! until a transform decides whether they are usable, since the service
//! emits `null` (and occasionally strings) for objects it could not place.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::transform::coords::Coordinates;

/// Path of the confirmed-coordinates endpoint.
pub const CONFIRMED_PATH: &str = "/api/coordenadas-confirmadas";
/// Path of the ML-candidates endpoint.
pub const CANDIDATES_PATH: &str = "/api/exoplanetas-candidatos-ml";

/// One row of the confirmed-coordinates endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalogRecord {
    #[serde(rename = "kepoi_name", default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub ra: Option<Value>,
    #[serde(default)]
    pub dec: Option<Value>,
    #[serde(rename = "X", default)]
    pub x: Option<Value>,
    #[serde(rename = "Y", default)]
    pub y: Option<Value>,
    #[serde(rename = "Z", default)]
    pub z: Option<Value>,
}

impl RawCatalogRecord {
    /// Cartesian position, if all three axes are finite numbers.
    pub fn cartesian(&self) -> Option<(f64, f64, f64)> {
        Some((number(&self.x)?, number(&self.y)?, number(&self.z)?))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    pub fn ra(&self) -> Option<f64> {
        number(&self.ra)
    }

    pub fn dec(&self) -> Option<f64> {
        number(&self.dec)
    }
}

/// One row of the ML-candidates endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidateRecord {
    #[serde(rename = "kepoi_name", default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub kepid: Option<Value>,
    #[serde(default)]
    pub ra: Option<Value>,
    #[serde(default)]
    pub dec: Option<Value>,
    #[serde(rename = "X", default)]
    pub x: Option<Value>,
    #[serde(rename = "Y", default)]
    pub y: Option<Value>,
    #[serde(rename = "Z", default)]
    pub z: Option<Value>,
    #[serde(default)]
    pub ml_result: Option<MlResult>,
}

impl RawCandidateRecord {
    pub fn cartesian(&self) -> Option<(f64, f64, f64)> {
        Some((number(&self.x)?, number(&self.y)?, number(&self.z)?))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    pub fn kepid(&self) -> Option<i64> {
        self.kepid.as_ref().and_then(Value::as_i64)
    }

    pub fn ra(&self) -> Option<f64> {
        number(&self.ra)
    }

    pub fn dec(&self) -> Option<f64> {
        number(&self.dec)
    }
}

/// Classifier verdict attached to a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlResult {
    pub prediction: Prediction,
    #[serde(default)]
    pub probability: Option<f64>,
}

/// Classifier label. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Prediction {
    Candidate,
    FalsePositive,
    Other(String),
}

impl From<String> for Prediction {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Candidate" => Prediction::Candidate,
            "False Positive" | "FalsePositive" => Prediction::FalsePositive,
            _ => Prediction::Other(label),
        }
    }
}

impl From<Prediction> for String {
    fn from(p: Prediction) -> Self {
        match p {
            Prediction::Candidate => "Candidate".to_string(),
            Prediction::FalsePositive => "False Positive".to_string(),
            Prediction::Other(label) => label,
        }
    }
}

/// A confirmed object shaped for the 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationPoint {
    /// `None` when the catalog row carried no `kepoi_name`.
    pub name: Option<String>,
    pub ra: f64,
    pub dec: f64,
    pub coordinates: Coordinates,
    /// `None` when the position sits at the origin.
    pub distance: Option<f64>,
    pub habitability: u8,
    pub base_direction: f64,
    pub base_elevation: f64,
}

/// An ML-scored candidate shaped for the 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePoint {
    pub name: Option<String>,
    pub kepid: Option<i64>,
    /// Absent when the service could not place the object.
    pub coordinates: Option<Coordinates>,
    pub ml_prediction: MlResult,
    pub distance: Option<f64>,
    pub habitability: u8,
    pub base_direction: f64,
    pub base_elevation: f64,
}

/// Scaled scene position of one starfield particle.
pub type ParticleVertex = [f64; 3];

/// Regroup a flat particle buffer into vertices. A trailing partial triple
/// is dropped.
pub fn vertices(flat: &[f64]) -> Vec<ParticleVertex> {
    flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

/// Split a response body into its rows, failing unless it is a JSON array.
pub fn rows(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(rows) => Ok(rows),
        other => Err(CatalogError::Parse(format!(
            "expected an array of records, got {}",
            kind(&other)
        ))),
    }
}

/// Decode a single row into `T`.
pub fn decode<T: for<'de> Deserialize<'de>>(row: Value) -> Result<T> {
    if !row.is_object() {
        return Err(CatalogError::Validation(format!(
            "record is {}, not an object",
            kind(&row)
        )));
    }
    serde_json::from_value(row).map_err(|e| CatalogError::Validation(e.to_string()))
}

fn number(v: &Option<Value>) -> Option<f64> {
    v.as_ref()
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
