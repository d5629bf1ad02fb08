use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::GeoError,
    geometry::{BBox, Geometry},
};

/// One GeoJSON feature, kept loose so that a single malformed feature is a
/// record-level problem rather than a parse failure for the whole file.
///
/// Any JSON value decodes: a non-object array element (`null`, a number, a
/// string) becomes a feature with no properties and no geometry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct Feature {
    pub properties: Value,
    pub geometry: Value,
}

impl From<Value> for Feature {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(mut obj) => Feature {
                properties: obj.remove("properties").unwrap_or_default(),
                geometry: obj.remove("geometry").unwrap_or_default(),
            },
            _ => Feature::default(),
        }
    }
}

impl Feature {
    /// Property object, if `properties` is one.
    pub fn props(&self) -> Option<&Map<String, Value>> {
        self.properties.as_object()
    }

    pub fn bbox(&self) -> Option<BBox> {
        Geometry::from_value(&self.geometry).and_then(|g| g.bbox())
    }
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

/// Parse `path` and return its features; the top level must be a FeatureCollection.
pub fn load_feature_collection(path: &Path) -> Result<Vec<Feature>, GeoError> {
    let text = std::fs::read_to_string(path).map_err(|source| GeoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feature_collection(&text).map_err(|e| match e {
        ParseFailure::Json(source) => GeoError::Json {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::WrongType => GeoError::NotFeatureCollection {
            path: path.to_path_buf(),
        },
    })
}

#[derive(Debug)]
pub(crate) enum ParseFailure {
    Json(serde_json::Error),
    WrongType,
}

pub(crate) fn parse_feature_collection(text: &str) -> Result<Vec<Feature>, ParseFailure> {
    let value: Value = serde_json::from_str(text).map_err(ParseFailure::Json)?;
    if value.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(ParseFailure::WrongType);
    }
    let fc: RawCollection = serde_json::from_value(value).map_err(ParseFailure::Json)?;
    Ok(fc.features)
}

/// Canonical form of an ID property so that `13`, `13.0` and `"13"` compare equal.
pub fn canonical_id(v: &Value) -> String {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i.to_string();
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
                _ => n.to_string(),
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().map(|i| i.to_string()).unwrap_or_else(|_| s.to_string())
        }
        other => other.to_string(),
    }
}
