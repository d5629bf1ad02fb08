//! Reading metric CSVs into keyed tables.
//!
//! A bad sample size reads as 0 and a bad value reads as absent; the row is
//! kept. Rows whose key cannot be formed are skipped and counted.

use std::{collections::BTreeMap, path::Path};

use tracing::{info, warn};

use crate::{
    error::MetricsError,
    metric::{ASSET_TYPE, BHK, LOCALITY_ID, MONTH, MetricKind, SAMPLE_SIZE},
};

/// Join key. Field order gives the output order: month, asset, bhk, locality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricKey {
    pub month: String,
    pub asset: String,
    pub bhk: String,
    pub locality_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRecord {
    pub value: Option<f64>,
    pub psf: Option<f64>,
    pub sample_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub kind: MetricKind,
    pub records: BTreeMap<MetricKey, MetricRecord>,
    /// Rows dropped for a missing key column or unparseable locality ID.
    pub skipped_rows: usize,
    /// Rows that replaced an earlier row with the same key.
    pub duplicate_rows: usize,
}

impl MetricTable {
    pub fn empty(kind: MetricKind) -> Self {
        Self {
            kind,
            records: BTreeMap::new(),
            skipped_rows: 0,
            duplicate_rows: 0,
        }
    }

    pub fn get(&self, key: &MetricKey) -> Option<&MetricRecord> {
        self.records.get(key)
    }
}

/// Blank or unparseable counts are 0.
pub fn parse_sample_size(field: Option<&str>) -> u32 {
    field.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Blank, unparseable, or non-finite values are absent.
pub fn parse_value(field: Option<&str>) -> Option<f64> {
    field
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Read `path` as a `kind` table. A missing file is [`MetricsError::MissingMetric`].
pub fn read_metric_table(path: &Path, kind: MetricKind) -> Result<MetricTable, MetricsError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MetricsError::MissingMetric(path.to_path_buf()));
        }
        Err(source) => {
            return Err(MetricsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let table = parse_metric_csv(&bytes, kind).map_err(|source| MetricsError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        file = kind.file_name(),
        keys = table.records.len(),
        skipped = table.skipped_rows,
        duplicates = table.duplicate_rows,
        "read metric table"
    );
    Ok(table)
}

/// Parse CSV bytes. Only a broken header row is an error.
pub fn parse_metric_csv(bytes: &[u8], kind: MetricKind) -> Result<MetricTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let col = |name: &str| headers.iter().position(|h| h == name);
    let (month_i, asset_i, bhk_i, loc_i) = (col(MONTH), col(ASSET_TYPE), col(BHK), col(LOCALITY_ID));
    let (value_i, psf_i, n_i) = (col(kind.value_column()), col(kind.psf_column()), col(SAMPLE_SIZE));

    let mut table = MetricTable::empty(kind);
    for (idx, rec) in reader.records().enumerate() {
        let line = idx + 2;
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn!(file = kind.file_name(), line, error = %e, "skipping malformed record");
                table.skipped_rows += 1;
                continue;
            }
        };
        let cell = |i: Option<usize>| i.and_then(|i| rec.get(i)).map(str::trim).filter(|s| !s.is_empty());

        let key = match (cell(month_i), cell(asset_i), cell(bhk_i), cell(loc_i)) {
            (Some(month), Some(asset), Some(bhk), Some(loc)) => match loc.parse::<i64>() {
                Ok(locality_id) => MetricKey {
                    month: month.to_string(),
                    asset: asset.to_string(),
                    bhk: bhk.to_string(),
                    locality_id,
                },
                Err(_) => {
                    warn!(file = kind.file_name(), line, locality = loc, "unparseable locality id");
                    table.skipped_rows += 1;
                    continue;
                }
            },
            _ => {
                warn!(file = kind.file_name(), line, "missing key column");
                table.skipped_rows += 1;
                continue;
            }
        };

        let record = MetricRecord {
            value: parse_value(cell(value_i)),
            psf: parse_value(cell(psf_i)),
            sample_size: parse_sample_size(cell(n_i)),
        };
        if table.records.insert(key, record).is_some() {
            table.duplicate_rows += 1;
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(loc: i64) -> MetricKey {
        MetricKey {
            month: "2025-07".into(),
            asset: "Residential".into(),
            bhk: "2".into(),
            locality_id: loc,
        }
    }

    #[test]
    fn numeric_leniency() {
        assert_eq!(parse_sample_size(None), 0);
        assert_eq!(parse_sample_size(Some(" ")), 0);
        assert_eq!(parse_sample_size(Some("n/a")), 0);
        assert_eq!(parse_sample_size(Some("-3")), 0);
        assert_eq!(parse_sample_size(Some(" 25 ")), 25);

        assert_eq!(parse_value(None), None);
        assert_eq!(parse_value(Some("abc")), None);
        assert_eq!(parse_value(Some("inf")), None);
        assert_eq!(parse_value(Some("NaN")), None);
        assert_eq!(parse_value(Some("0")), Some(0.0));
        assert_eq!(parse_value(Some("1e6")), Some(1_000_000.0));
    }

    #[test]
    fn keys_skips_and_last_wins() {
        let csv = "\u{feff}Month,CityID,MicroMarketID,LocalityID,BHK,AssetType,MedianMonthlyRent,MedianRentPSF,SampleSize,FreshnessDate\n\
                   2025-07,13,100,11,2,Residential,40000,60,30,2025-07-15\n\
                   2025-07,13,100,11,2,Residential,45000,61,35,2025-07-16\n\
                   2025-07,13,100,x12,2,Residential,1,1,1,2025-07-15\n\
                   2025-07,13,100,13,,Residential,1,1,1,2025-07-15\n\
                   2025-07,13,100,14,2,Residential,bad,,,2025-07-15\n";
        let t = parse_metric_csv(csv.as_bytes(), MetricKind::Rent).unwrap();

        assert_eq!(t.records.len(), 2);
        assert_eq!(t.skipped_rows, 2);
        assert_eq!(t.duplicate_rows, 1);
        assert_eq!(
            t.get(&key(11)),
            Some(&MetricRecord {
                value: Some(45000.0),
                psf: Some(61.0),
                sample_size: 35
            })
        );
        assert_eq!(
            t.get(&key(14)),
            Some(&MetricRecord {
                value: None,
                psf: None,
                sample_size: 0
            })
        );
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_metric_table(&dir.path().join("nope.csv"), MetricKind::Asking).unwrap_err();
        assert!(matches!(err, MetricsError::MissingMetric(_)));
    }
}
