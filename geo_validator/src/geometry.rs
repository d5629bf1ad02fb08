//! Bounding boxes for the GeoJSON geometry types the layers use.
//!
//! Only the outer ring of a polygon counts toward its bbox; holes cannot extend
//! it anyway. The "centroid" used for containment checks is the bbox midpoint,
//! not a true area centroid.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// `[lon, lat, ...]`. Positions with fewer than two numbers are ignored.
pub type Position = Vec<f64>;

/// Supported RFC 7946 geometries, decoded from `{"type": ..., "coordinates": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Decode a raw geometry object. Unsupported types (e.g.
    /// GeometryCollection) and malformed coordinates yield `None`.
    pub fn from_value(v: &Value) -> Option<Self> {
        Geometry::deserialize(v).ok()
    }

    pub fn bbox(&self) -> Option<BBox> {
        let points: Vec<&Position> = match self {
            Geometry::Point(p) => vec![p],
            Geometry::LineString(line) => line.iter().collect(),
            Geometry::MultiLineString(lines) => lines.iter().flatten().collect(),
            Geometry::Polygon(rings) => rings.first().map(|r| r.iter().collect()).unwrap_or_default(),
            Geometry::MultiPolygon(polys) => polys.iter().filter_map(|p| p.first()).flatten().collect(),
        };
        BBox::from_positions(points)
    }
}

/// Axis-aligned box in lon/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BBox {
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        positions
            .into_iter()
            .filter(|p| p.len() >= 2)
            .fold(None, |acc: Option<BBox>, p| {
                let (x, y) = (p[0], p[1]);
                Some(match acc {
                    None => BBox { west: x, south: y, east: x, north: y },
                    Some(b) => BBox {
                        west: b.west.min(x),
                        south: b.south.min(y),
                        east: b.east.max(x),
                        north: b.north.max(y),
                    },
                })
            })
    }

    /// Midpoint of the box, `(lon, lat)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        self.west <= x && x <= self.east && self.south <= y && y <= self.north
    }

    pub fn is_wgs84(&self) -> bool {
        let lon = -180.0..=180.0;
        let lat = -90.0..=90.0;
        lon.contains(&self.west) && lon.contains(&self.east) && lat.contains(&self.south) && lat.contains(&self.north)
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.west, self.south, self.east, self.north)
    }
}
