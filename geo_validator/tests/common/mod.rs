#![allow(dead_code)]

use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

pub fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]]
    })
}

pub fn feature(props: Value, geometry: Value) -> Value {
    json!({"type": "Feature", "properties": props, "geometry": geometry})
}

pub fn collection(features: Vec<Value>) -> Value {
    json!({"type": "FeatureCollection", "features": features})
}

pub fn write(dir: &Path, name: &str, v: &Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(v).unwrap()).unwrap();
}

/// City covering the box (72.7, 18.8)-(73.1, 19.3), two micro-markets side by
/// side, and one locality inside each.
pub fn happy_layers() -> (Value, Value, Value) {
    let city = collection(vec![feature(
        json!({"CityID": 13, "CityName": "Mumbai"}),
        square(72.7, 18.8, 73.1, 19.3),
    )]);
    let mms = collection(vec![
        feature(
            json!({"MicroMarketID": 100, "CityID": 13, "MicroMarketName": "Western Suburbs"}),
            square(72.8, 19.0, 72.9, 19.2),
        ),
        feature(
            json!({"MicroMarketID": 101, "CityID": 13, "MicroMarketName": "Central Suburbs"}),
            square(72.9, 19.0, 73.0, 19.2),
        ),
    ]);
    let locs = collection(vec![
        feature(
            json!({"LocalityID": 16137, "MicroMarketID": 100, "CityID": 13, "LocalityName": "Andheri West"}),
            square(72.82, 19.10, 72.84, 19.14),
        ),
        feature(
            json!({"LocalityID": 16138, "MicroMarketID": "101", "CityID": 13, "LocalityName": "Ghatkopar"}),
            square(72.90, 19.06, 72.92, 19.10),
        ),
    ]);
    (city, mms, locs)
}

pub fn write_layers(city: &Value, mms: &Value, locs: &Value) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "mumbai_city.geojson", city);
    write(dir.path(), "mumbai_micro_markets.geojson", mms);
    write(dir.path(), "mumbai_localities.geojson", locs);
    dir
}
