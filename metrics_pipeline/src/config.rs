//! Run settings for both jobs. Paths are resolved against a project root by
//! the constructors; binaries then apply CLI overrides field by field.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{Datelike, NaiveDate};

use crate::error::MetricsError;

/// Default sample-size threshold for painting a value.
pub const DEFAULT_MIN_SAMPLE: u32 = 20;

/// City stamped on rows whose locality has none.
pub const DEFAULT_CITY_ID: i64 = 13;

pub const DEFAULT_SEED: u64 = 42;

/// A calendar month in `YYYY-MM` form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(String);

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Month(format!("{:04}-{:02}", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Month {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let shaped = s.len() == 7 && s.as_bytes()[4] == b'-';
        match NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            Ok(_) if shaped => Ok(Month(s.to_string())),
            _ => Err(MetricsError::InvalidMonth(s.to_string())),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to generate; independent of where files live.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeOptions {
    pub month: Month,
    /// Asset codes to emit; `None` means every code in dims.
    pub assets: Option<Vec<String>>,
    /// BHK codes to emit; `None` means every code in dims.
    pub bhk: Option<Vec<String>>,
    pub city_id: i64,
    /// Written to every row's `FreshnessDate`.
    pub freshness: NaiveDate,
}

impl FakeOptions {
    /// Current month, all codes, default city.
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            month: Month::of(today),
            assets: None,
            bhk: None,
            city_id: DEFAULT_CITY_ID,
            freshness: today,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeConfig {
    /// `frontend/dims.json`
    pub dims_path: PathBuf,
    /// Directory receiving the three CSVs.
    pub out_dir: PathBuf,
    pub seed: u64,
    pub options: FakeOptions,
}

impl FakeConfig {
    pub fn for_root(root: &Path, today: NaiveDate) -> Self {
        Self {
            dims_path: root.join("frontend").join("dims.json"),
            out_dir: root.join("data").join("metrics"),
            seed: DEFAULT_SEED,
            options: FakeOptions::for_date(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateConfig {
    /// Directory holding `metrics/` and receiving `out/`.
    pub data_dir: PathBuf,
    /// Inclusive threshold a count must reach for its value to be painted.
    pub min_sample: u32,
}

impl AggregateConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            min_sample: DEFAULT_MIN_SAMPLE,
        }
    }

    pub fn metrics_dir(&self) -> PathBuf {
        self.data_dir.join("metrics")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.data_dir.join("out")
    }
}
