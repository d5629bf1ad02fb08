//! Sanity checks for the Mumbai GeoJSON boundary layers.
//!
//! Three FeatureCollections (city, micro-markets, localities) are loaded from
//! one directory and checked for:
//! - required properties and per-layer ID uniqueness (blocking errors)
//! - coordinates outside WGS84 ranges (warnings)
//! - locality → micro-market references (blocking errors)
//! - locality bbox centre inside the city and micro-market bboxes (warnings)
//!
//! Containment uses bounding boxes only, so those checks are advisory.

pub mod error;
pub mod geometry;
pub mod layer;
pub mod load;
pub mod report;
pub mod validate;

pub use error::GeoError;
pub use report::{Problem, ValidationReport};
pub use validate::{validate_dir, validate_layers};
