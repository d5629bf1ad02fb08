//! Seeded fake metric tables built from the real IDs and codes in `dims.json`.
//!
//! Values come from per-asset ranges (commercial assets run higher) and are
//! truncated to integers. Sample sizes mostly clear the default paint
//! threshold.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use dims_builder::Dims;
use rand::{Rng, SeedableRng, rngs::StdRng};
use shared_utils::sink::write_bytes_atomic;
use tracing::info;

use crate::{
    config::{FakeConfig, FakeOptions},
    error::MetricsError,
    metric::MetricKind,
};

const COMMERCIAL_PREFIXES: [&str; 3] = ["office", "commercial", "retail"];
const FALLBACK_ASSETS: [&str; 1] = ["Residential"];
const FALLBACK_BHK: [&str; 3] = ["1", "2", "3"];

/// Value ranges for one asset class.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranges {
    /// Multiplied by the base factor and 1e5.
    pub registered: Range<f64>,
    /// Multiplier on the registered price.
    pub asking_markup: Range<f64>,
    /// Multiplied by the base factor and 1e3.
    pub rent: Range<f64>,
    pub price_psf: Range<f64>,
    pub rent_psf: Range<f64>,
}

impl Ranges {
    pub fn residential() -> Self {
        Self {
            registered: 90.0..160.0,
            asking_markup: 1.02..1.15,
            rent: 25.0..140.0,
            price_psf: 12_000.0..40_000.0,
            rent_psf: 40.0..140.0,
        }
    }

    pub fn commercial() -> Self {
        Self {
            registered: 120.0..240.0,
            asking_markup: 1.01..1.10,
            rent: 60.0..300.0,
            price_psf: 18_000.0..50_000.0,
            rent_psf: 70.0..200.0,
        }
    }

    /// Commercial for codes starting with office/commercial/retail, any case.
    pub fn for_asset(code: &str) -> Self {
        let lower = code.to_lowercase();
        if COMMERCIAL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            Self::commercial()
        } else {
            Self::residential()
        }
    }
}

/// One generated CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeRow {
    pub month: String,
    pub city_id: i64,
    pub micro_market_id: i64,
    pub locality_id: i64,
    pub bhk: String,
    pub asset: String,
    pub value: i64,
    pub psf: i64,
    pub sample_size: u32,
    pub freshness: NaiveDate,
}

impl FakeRow {
    fn record(&self) -> [String; 10] {
        [
            self.month.clone(),
            self.city_id.to_string(),
            self.micro_market_id.to_string(),
            self.locality_id.to_string(),
            self.bhk.clone(),
            self.asset.clone(),
            self.value.to_string(),
            self.psf.to_string(),
            self.sample_size.to_string(),
            self.freshness.format("%Y-%m-%d").to_string(),
        ]
    }
}

/// Rows for the three tables, aligned: index `i` is the same key in each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeMetrics {
    pub asking: Vec<FakeRow>,
    pub registered: Vec<FakeRow>,
    pub rent: Vec<FakeRow>,
}

impl FakeMetrics {
    pub fn rows(&self, kind: MetricKind) -> &[FakeRow] {
        match kind {
            MetricKind::Asking => &self.asking,
            MetricKind::Registered => &self.registered,
            MetricKind::Rent => &self.rent,
        }
    }

    /// Rows per table.
    pub fn len(&self) -> usize {
        self.asking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asking.is_empty()
    }
}

/// Read and parse `dims.json`. A missing file or one without localities is an error.
pub fn load_dims(path: &Path) -> Result<Dims, MetricsError> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MetricsError::MissingDims(path.to_path_buf()));
        }
        Err(source) => {
            return Err(MetricsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let dims: Dims = serde_json::from_str(&text).map_err(|source| MetricsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if dims.localities.is_empty() {
        return Err(MetricsError::NoLocalities(path.to_path_buf()));
    }
    Ok(dims)
}

fn codes(explicit: Option<&[String]>, from_dims: Vec<String>, fallback: &[&str]) -> Vec<String> {
    match explicit {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ if !from_dims.is_empty() => from_dims,
        _ => fallback.iter().map(|s| s.to_string()).collect(),
    }
}

/// Draw one row per locality × asset × bhk, in that nesting order.
pub fn generate<R: Rng>(dims: &Dims, options: &FakeOptions, rng: &mut R) -> FakeMetrics {
    let assets = codes(
        options.assets.as_deref(),
        dims.assets.iter().map(|a| a.code.clone()).collect(),
        &FALLBACK_ASSETS,
    );
    let bhks = codes(
        options.bhk.as_deref(),
        dims.bhk.iter().map(|b| b.code.clone()).collect(),
        &FALLBACK_BHK,
    );

    let mut out = FakeMetrics::default();
    for loc in &dims.localities {
        let city_id = loc.city_id.unwrap_or(options.city_id);
        let micro_market_id = loc.micro_market_id.unwrap_or(0);

        for asset in &assets {
            let ranges = Ranges::for_asset(asset);
            for bhk in &bhks {
                let base = rng.random_range(0.8..1.2);
                let registered = (base * rng.random_range(ranges.registered.clone()) * 1e5) as i64;
                let asking = (registered as f64 * rng.random_range(ranges.asking_markup.clone())) as i64;
                let rent = (base * rng.random_range(ranges.rent.clone()) * 1e3) as i64;
                let price_psf = rng.random_range(ranges.price_psf.clone()) as i64;
                let rent_psf = rng.random_range(ranges.rent_psf.clone()) as i64;

                let n_registered = rng.random_range(25..=90);
                let n_asking = rng.random_range(30..=120);
                let n_rent = rng.random_range(20..=100);

                let row = |value, psf, sample_size| FakeRow {
                    month: options.month.to_string(),
                    city_id,
                    micro_market_id,
                    locality_id: loc.id,
                    bhk: bhk.clone(),
                    asset: asset.clone(),
                    value,
                    psf,
                    sample_size,
                    freshness: options.freshness,
                };
                out.asking.push(row(asking, price_psf, n_asking));
                out.registered.push(row(registered, price_psf, n_registered));
                out.rent.push(row(rent, rent_psf, n_rent));
            }
        }
    }
    out
}

/// Encode one table with its canonical header.
pub fn to_csv(kind: MetricKind, rows: &[FakeRow]) -> Result<Vec<u8>, csv::Error> {
    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(kind.headers())?;
    for r in rows {
        w.write_record(r.record())?;
    }
    w.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// Write the three CSVs into `dir`, each atomically. Returns the paths in
/// [`MetricKind::ALL`] order.
pub fn write_fake_metrics(dir: &Path, metrics: &FakeMetrics) -> Result<Vec<PathBuf>, MetricsError> {
    let mut written = Vec::with_capacity(MetricKind::ALL.len());
    for kind in MetricKind::ALL {
        let path = dir.join(kind.file_name());
        let bytes = to_csv(kind, metrics.rows(kind)).map_err(|source| MetricsError::Csv {
            path: path.clone(),
            source,
        })?;
        write_bytes_atomic(&path, &bytes)?;
        info!(path = %path.display(), rows = metrics.rows(kind).len(), "wrote metric table");
        written.push(path);
    }
    Ok(written)
}

/// Load dims, generate with a generator seeded from `config.seed`, write.
pub fn run(config: &FakeConfig) -> Result<Vec<PathBuf>, MetricsError> {
    let dims = load_dims(&config.dims_path)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let metrics = generate(&dims, &config.options, &mut rng);
    info!(
        localities = dims.localities.len(),
        rows = metrics.len(),
        month = %config.options.month,
        seed = config.seed,
        "generated fake metrics"
    );
    write_fake_metrics(&config.out_dir, &metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dims_builder::model::{CodeLabel, Locality};

    fn dims() -> Dims {
        let code = |c: &str| CodeLabel {
            code: c.into(),
            label: c.into(),
        };
        Dims {
            bhk: vec![code("1"), code("2")],
            assets: vec![code("Office"), code("Residential")],
            localities: vec![
                Locality {
                    id: 7,
                    name: "Worli".into(),
                    city_id: None,
                    micro_market_id: Some(100),
                    micro_market_name: Some("South".into()),
                },
                Locality {
                    id: 8,
                    name: "Powai".into(),
                    city_id: Some(13),
                    micro_market_id: None,
                    micro_market_name: None,
                },
            ],
            ..Dims::default()
        }
    }

    fn options() -> FakeOptions {
        let mut o = FakeOptions::for_date(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
        o.city_id = 99;
        o
    }

    #[test]
    fn commercial_prefixes() {
        assert_eq!(Ranges::for_asset("OFFICE_A"), Ranges::commercial());
        assert_eq!(Ranges::for_asset("retail"), Ranges::commercial());
        assert_eq!(Ranges::for_asset("Residential"), Ranges::residential());
        assert_eq!(Ranges::for_asset("Shop-Retail"), Ranges::residential());
    }

    #[test]
    fn one_row_per_combination_within_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = generate(&dims(), &options(), &mut rng);
        assert_eq!(m.len(), 2 * 2 * 2);
        assert_eq!(m.registered.len(), m.rent.len());

        for ((a, r), n) in m.asking.iter().zip(&m.registered).zip(&m.rent) {
            assert_eq!((a.locality_id, &a.asset, &a.bhk), (r.locality_id, &r.asset, &r.bhk));
            assert_eq!((a.locality_id, &a.asset, &a.bhk), (n.locality_id, &n.asset, &n.bhk));
            assert!(a.value >= r.value);
            assert_eq!(a.psf, r.psf);
            assert!((30..=120).contains(&a.sample_size));
            assert!((25..=90).contains(&r.sample_size));
            assert!((20..=100).contains(&n.sample_size));
            if a.asset == "Office" {
                assert!((18_000..50_000).contains(&a.psf));
                assert!((70..200).contains(&n.psf));
            } else {
                assert!((12_000..40_000).contains(&a.psf));
                assert!((40..140).contains(&n.psf));
                assert!(r.value >= (0.8 * 90.0 * 1e5) as i64 - 1);
            }
        }
    }

    #[test]
    fn city_and_micro_market_fallbacks() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = generate(&dims(), &options(), &mut rng);
        let worli = m.rent.iter().find(|r| r.locality_id == 7).unwrap();
        let powai = m.rent.iter().find(|r| r.locality_id == 8).unwrap();
        assert_eq!((worli.city_id, worli.micro_market_id), (99, 100));
        assert_eq!((powai.city_id, powai.micro_market_id), (13, 0));
    }

    #[test]
    fn cli_lists_override_and_fallbacks_apply() {
        let mut o = options();
        o.assets = Some(vec!["Retail".into()]);
        let mut rng = StdRng::seed_from_u64(1);
        let m = generate(&dims(), &o, &mut rng);
        assert!(m.asking.iter().all(|r| r.asset == "Retail"));
        assert_eq!(m.len(), 2 * 2);

        let bare = Dims {
            localities: dims().localities,
            ..Dims::default()
        };
        let m = generate(&bare, &options(), &mut rng);
        let bhks: Vec<_> = m.asking.iter().filter(|r| r.locality_id == 7).map(|r| r.bhk.as_str()).collect();
        assert_eq!(bhks, vec!["1", "2", "3"]);
        assert!(m.asking.iter().all(|r| r.asset == "Residential"));
    }

    #[test]
    fn same_seed_same_rows() {
        let a = generate(&dims(), &options(), &mut StdRng::seed_from_u64(42));
        let b = generate(&dims(), &options(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn csv_layout() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = generate(&dims(), &options(), &mut rng);
        let text = String::from_utf8(to_csv(MetricKind::Asking, &m.asking).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Month,CityID,MicroMarketID,LocalityID,BHK,AssetType,MedianAskingPrice,MedianPricePSF,SampleSize,FreshnessDate"
        );
        let first: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(first[..6], ["2025-07", "99", "100", "7", "1", "Office"]);
        assert_eq!(first[9], "2025-07-15");
    }

    #[test]
    fn load_dims_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dims.json");
        assert!(matches!(load_dims(&path), Err(MetricsError::MissingDims(_))));

        std::fs::write(&path, r#"{"bhk": [], "localities": []}"#).unwrap();
        assert!(matches!(load_dims(&path), Err(MetricsError::NoLocalities(_))));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load_dims(&path), Err(MetricsError::Json { .. })));
    }
}
