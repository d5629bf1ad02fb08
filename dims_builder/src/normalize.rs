//! Rows → [`Dims`].

use std::{collections::HashMap, path::Path};

use tracing::{info, warn};

use crate::{
    aliases::*,
    config::{CityTarget, DimsConfig, OrphanLocalityPolicy, files},
    encoding::EncodingPolicy,
    error::DimsError,
    model::{City, CodeLabel, Dims, Locality, MicroMarket},
    resolve::{as_float, as_int, as_text, resolve},
    table::{Row, read_table},
};

/// Raw rows of the five masters. Missing masters are empty.
#[derive(Debug, Clone, Default)]
pub struct MasterTables {
    /// `dim_bhk.csv`
    pub bhk: Vec<Row>,
    /// `dim_asset_type.csv`
    pub assets: Vec<Row>,
    /// `dim_city.csv`
    pub city: Vec<Row>,
    /// `dim_micro_market.csv`
    pub micro_markets: Vec<Row>,
    /// `dim_locality.csv`
    pub localities: Vec<Row>,
}

impl MasterTables {
    /// Read every master under `dir`.
    pub fn load(dir: &Path, policy: &EncodingPolicy) -> Result<Self, DimsError> {
        let rows = |name: &str| -> Result<Vec<Row>, DimsError> {
            Ok(read_table(&dir.join(name), policy)?.map(|t| t.rows).unwrap_or_default())
        };
        Ok(Self {
            bhk: rows(files::BHK)?,
            assets: rows(files::ASSET_TYPE)?,
            city: rows(files::CITY)?,
            micro_markets: rows(files::MICRO_MARKET)?,
            localities: rows(files::LOCALITY)?,
        })
    }
}

/// Counters describing what normalization dropped or kept.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Rows across all masters.
    pub rows_read: usize,
    /// Rows dropped because their primary ID/code did not resolve.
    pub rows_without_id: usize,
    /// Localities dropped under [`OrphanLocalityPolicy::Drop`].
    pub orphan_localities_dropped: usize,
    /// Localities kept under [`OrphanLocalityPolicy::Keep`].
    pub orphan_localities_kept: usize,
    /// Whether a city row matched the target.
    pub city_matched: bool,
}

/// Normalize the masters into the dims document.
///
/// Pure and deterministic: the same tables and config give the same `Dims`.
pub fn build_dims(tables: &MasterTables, config: &DimsConfig) -> (Dims, BuildReport) {
    let mut report = BuildReport {
        rows_read: tables.bhk.len()
            + tables.assets.len()
            + tables.city.len()
            + tables.micro_markets.len()
            + tables.localities.len(),
        ..BuildReport::default()
    };

    let bhk = code_labels(&tables.bhk, BHK_CODE, BHK_LABEL, &mut report);
    let assets = code_labels(&tables.assets, ASSET_CODE, ASSET_LABEL, &mut report);

    let city = select_city(&tables.city, &config.city);
    report.city_matched = city.is_some();
    if city.is_none() {
        warn!(target_name = %config.city.name, target_id = config.city.id, "no city row matched");
    }

    let micromarkets = micro_markets(&tables.micro_markets, &mut report);
    let names: HashMap<i64, &str> = micromarkets.iter().map(|m| (m.id, m.name.as_str())).collect();
    let localities = localities(&tables.localities, &names, config.orphan_localities, &mut report);

    info!(?report, "normalized masters");
    (
        Dims {
            bhk,
            assets,
            city,
            micromarkets,
            localities,
        },
        report,
    )
}

fn code_labels(rows: &[Row], code: &[&str], label: &[&str], report: &mut BuildReport) -> Vec<CodeLabel> {
    let mut out: Vec<CodeLabel> = rows
        .iter()
        .filter_map(|r| {
            let Some(code) = resolve(r, code, as_text) else {
                report.rows_without_id += 1;
                return None;
            };
            let label = resolve(r, label, as_text).unwrap_or_else(|| code.clone());
            Some(CodeLabel { code, label })
        })
        .collect();
    out.sort_by(|a, b| a.code.cmp(&b.code));
    out
}

/// First row with a resolvable ID whose name or ID matches the target.
fn select_city(rows: &[Row], target: &CityTarget) -> Option<City> {
    let want = target.name.trim().to_lowercase();
    rows.iter().find_map(|r| {
        let id = resolve(r, CITY_ID, as_int)?;
        let name = resolve(r, CITY_NAME, as_text);
        let by_name = name.as_deref().is_some_and(|n| n.to_lowercase() == want);
        if !by_name && id != target.id {
            return None;
        }
        let lon = resolve(r, CENTER_LON, as_float).unwrap_or(target.default_center[0]);
        let lat = resolve(r, CENTER_LAT, as_float).unwrap_or(target.default_center[1]);
        let zoom = resolve(r, ZOOM, as_float).unwrap_or(target.default_zoom);
        Some(City {
            city_id: id,
            city_name: name.unwrap_or_else(|| target.default_name.clone()),
            center: [lon, lat],
            zoom,
        })
    })
}

fn micro_markets(rows: &[Row], report: &mut BuildReport) -> Vec<MicroMarket> {
    let mut out: Vec<MicroMarket> = rows
        .iter()
        .filter_map(|r| {
            let Some(id) = resolve(r, MICRO_MARKET_ID, as_int) else {
                report.rows_without_id += 1;
                return None;
            };
            Some(MicroMarket {
                id,
                name: resolve(r, MICRO_MARKET_NAME, as_text).unwrap_or_else(|| "(Unnamed)".to_string()),
                city_id: resolve(r, CITY_ID, as_int),
            })
        })
        .collect();
    out.sort_by(|a, b| (a.city_id.unwrap_or(0), &a.name).cmp(&(b.city_id.unwrap_or(0), &b.name)));
    out
}

fn localities(
    rows: &[Row],
    mm_names: &HashMap<i64, &str>,
    policy: OrphanLocalityPolicy,
    report: &mut BuildReport,
) -> Vec<Locality> {
    let mut out = Vec::with_capacity(rows.len());
    for r in rows {
        let Some(id) = resolve(r, LOCALITY_ID, as_int) else {
            report.rows_without_id += 1;
            continue;
        };
        let micro_market_id = resolve(r, LOCALITY_MICRO_MARKET_ID, as_int);
        let micro_market_name = micro_market_id
            .and_then(|mm| mm_names.get(&mm))
            .map(|n| n.to_string());

        if micro_market_name.is_none() {
            match policy {
                OrphanLocalityPolicy::Drop => {
                    warn!(locality = id, ?micro_market_id, "dropping locality with unresolved micro-market");
                    report.orphan_localities_dropped += 1;
                    continue;
                }
                OrphanLocalityPolicy::Keep => report.orphan_localities_kept += 1,
            }
        }

        out.push(Locality {
            id,
            name: resolve(r, LOCALITY_NAME, as_text).unwrap_or_else(|| format!("Locality {id}")),
            city_id: resolve(r, CITY_ID, as_int),
            micro_market_id,
            micro_market_name,
        });
    }
    out.sort_by(|a, b| (a.city_id.unwrap_or(0), &a.name).cmp(&(b.city_id.unwrap_or(0), &b.name)));
    out
}
