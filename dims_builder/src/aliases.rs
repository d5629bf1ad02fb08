//! Accepted column spellings per logical field, highest priority first.
//!
//! Lookups are case-sensitive; the upper/lower variants are listed explicitly.

/// BHK code column.
pub const BHK_CODE: &[&str] = &["code", "CODE", "BHK", "bhk", "bhk_code"];
/// BHK display label column.
pub const BHK_LABEL: &[&str] = &["label", "LABEL", "name", "display", "BHKLabel"];

/// Asset type code column.
pub const ASSET_CODE: &[&str] = &["code", "CODE", "AssetType", "ASSETTYPE", "asset", "asset_code"];
/// Asset type display label column.
pub const ASSET_LABEL: &[&str] = &["label", "LABEL", "name", "display", "AssetTypeName"];

/// City ID, in every table that carries one.
pub const CITY_ID: &[&str] = &["CityID", "CITYID", "cityid"];
/// City name in the city master.
pub const CITY_NAME: &[&str] = &["CityName", "CITYNAME", "cityname", "name"];
/// Map centre longitude.
pub const CENTER_LON: &[&str] = &["CenterLon", "center_lon", "lon", "LON"];
/// Map centre latitude.
pub const CENTER_LAT: &[&str] = &["CenterLat", "center_lat", "lat", "LAT"];
/// Initial map zoom.
pub const ZOOM: &[&str] = &["Zoom", "zoom"];

/// Micro-market ID in the micro-market master.
pub const MICRO_MARKET_ID: &[&str] = &["MicroMarketID", "MICROMARKETID", "locationid", "LocationID", "LOC_ID"];
/// Micro-market name.
pub const MICRO_MARKET_NAME: &[&str] = &["MicroMarketName", "MICROMARKETNAME", "locationname", "LocationName", "NAME"];

/// Locality ID.
pub const LOCALITY_ID: &[&str] = &["LocalityID", "LOCALITYID", "sublocationid", "SubLocationID"];
/// Locality name.
pub const LOCALITY_NAME: &[&str] = &["LocalityName", "LOCALITYNAME", "sublocationname", "SubLocationName", "NAME"];
/// Micro-market reference in the locality master (no `LOC_ID` here).
pub const LOCALITY_MICRO_MARKET_ID: &[&str] = &["MicroMarketID", "MICROMARKETID", "locationid", "LocationID"];
