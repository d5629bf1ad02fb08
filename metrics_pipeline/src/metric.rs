//! The three metric tables and the four paint layers.

use std::fmt;

use serde::Serialize;

pub const MONTH: &str = "Month";
pub const CITY_ID: &str = "CityID";
pub const MICRO_MARKET_ID: &str = "MicroMarketID";
pub const LOCALITY_ID: &str = "LocalityID";
pub const BHK: &str = "BHK";
pub const ASSET_TYPE: &str = "AssetType";
pub const SAMPLE_SIZE: &str = "SampleSize";
pub const FRESHNESS_DATE: &str = "FreshnessDate";

/// One of the metric CSVs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKind {
    Asking,
    Registered,
    Rent,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Asking, MetricKind::Registered, MetricKind::Rent];

    pub const fn file_name(self) -> &'static str {
        match self {
            MetricKind::Asking => "metric_asking_monthly.csv",
            MetricKind::Registered => "metric_registered_monthly.csv",
            MetricKind::Rent => "metric_rent_monthly.csv",
        }
    }

    /// Column holding the median value.
    pub const fn value_column(self) -> &'static str {
        match self {
            MetricKind::Asking => "MedianAskingPrice",
            MetricKind::Registered => "MedianRegisteredPrice",
            MetricKind::Rent => "MedianMonthlyRent",
        }
    }

    /// Column holding the per-square-foot value.
    pub const fn psf_column(self) -> &'static str {
        match self {
            MetricKind::Asking | MetricKind::Registered => "MedianPricePSF",
            MetricKind::Rent => "MedianRentPSF",
        }
    }

    /// Canonical header row, in file order.
    pub const fn headers(self) -> [&'static str; 10] {
        [
            MONTH,
            CITY_ID,
            MICRO_MARKET_ID,
            LOCALITY_ID,
            BHK,
            ASSET_TYPE,
            self.value_column(),
            self.psf_column(),
            SAMPLE_SIZE,
            FRESHNESS_DATE,
        ]
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A choropleth layer. Its name is the first path segment under `choropleth/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintMetric {
    Asking,
    Registered,
    Rent,
    Yield,
}

impl PaintMetric {
    pub const fn name(self) -> &'static str {
        match self {
            PaintMetric::Asking => "asking",
            PaintMetric::Registered => "registered",
            PaintMetric::Rent => "rent",
            PaintMetric::Yield => "yield",
        }
    }
}

impl From<MetricKind> for PaintMetric {
    fn from(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Asking => PaintMetric::Asking,
            MetricKind::Registered => PaintMetric::Registered,
            MetricKind::Rent => PaintMetric::Rent,
        }
    }
}

impl fmt::Display for PaintMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
