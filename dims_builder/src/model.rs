//! The `dims.json` document.
//!
//! Field names follow what the front end reads: camelCase for the
//! micro-market/locality records and `CityID`/`CityName` for the city.

use serde::{Deserialize, Serialize};

/// A coded dimension value (BHK or asset type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLabel {
    /// Code as it appears in metric CSVs.
    pub code: String,
    /// Display label; defaults to the code.
    pub label: String,
}

/// The target city with its initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// City ID.
    #[serde(rename = "CityID")]
    pub city_id: i64,
    /// Display name.
    #[serde(rename = "CityName")]
    pub city_name: String,
    /// `[lon, lat]` map centre.
    pub center: [f64; 2],
    /// Initial map zoom.
    pub zoom: f64,
}

/// A micro-market record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroMarket {
    /// Micro-market ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Owning city, if the master carried one.
    pub city_id: Option<i64>,
}

/// A locality record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    /// Locality ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Owning city, if the master carried one.
    pub city_id: Option<i64>,
    /// Owning micro-market reference.
    pub micro_market_id: Option<i64>,
    /// Name of the owning micro-market; only present when the reference resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micro_market_name: Option<String>,
}

/// The whole dimensions document, in output key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dims {
    /// BHK codes sorted by code.
    #[serde(default)]
    pub bhk: Vec<CodeLabel>,
    /// Asset types sorted by code.
    #[serde(default)]
    pub assets: Vec<CodeLabel>,
    /// Target city, `null` when no row matched.
    #[serde(default)]
    pub city: Option<City>,
    /// Micro-markets sorted by (cityId, name).
    #[serde(default)]
    pub micromarkets: Vec<MicroMarket>,
    /// Localities sorted by (cityId, name).
    #[serde(default)]
    pub localities: Vec<Locality>,
}
