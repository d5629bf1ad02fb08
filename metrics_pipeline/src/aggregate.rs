//! The per-key join of the three metric tables.
//!
//! For every key in the union of the tables this emits one [`SummaryRecord`]
//! and up to four [`ChoroplethPoint`]s, one per paint layer whose value is
//! present and whose sample sizes reach the threshold. Keys never interact.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;
use shared_utils::sink::{DirSink, JsonSink, SinkError};
use tracing::{info, warn};

use crate::{
    config::AggregateConfig,
    error::MetricsError,
    metric::{MetricKind, PaintMetric},
    table::{MetricKey, MetricTable, read_metric_table},
};

/// The three inputs, all required.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTables {
    pub asking: MetricTable,
    pub registered: MetricTable,
    pub rent: MetricTable,
}

impl MetricTables {
    pub fn load(dir: &Path) -> Result<Self, MetricsError> {
        let read = |kind: MetricKind| read_metric_table(&dir.join(kind.file_name()), kind);
        Ok(Self {
            asking: read(MetricKind::Asking)?,
            registered: read(MetricKind::Registered)?,
            rent: read(MetricKind::Rent)?,
        })
    }

    pub fn get(&self, kind: MetricKind) -> &MetricTable {
        match kind {
            MetricKind::Asking => &self.asking,
            MetricKind::Registered => &self.registered,
            MetricKind::Rent => &self.rent,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub asking: u32,
    pub registered: u32,
    pub rent: u32,
}

impl Counts {
    pub fn get(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Asking => self.asking,
            MetricKind::Registered => self.registered,
            MetricKind::Rent => self.rent,
        }
    }
}

/// One `summary/<locality>/<month>/<asset>/<bhk>.json` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub month: String,
    pub asset: String,
    pub bhk: String,
    pub locality_id: i64,
    pub median_asking: Option<f64>,
    pub median_registered: Option<f64>,
    pub median_rent: Option<f64>,
    #[serde(rename = "yield")]
    pub rental_yield: Option<f64>,
    pub counts: Counts,
}

impl SummaryRecord {
    pub fn median(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Asking => self.median_asking,
            MetricKind::Registered => self.median_registered,
            MetricKind::Rent => self.median_rent,
        }
    }

    /// Path relative to the output root.
    pub fn rel_path(&self) -> PathBuf {
        let mut p = PathBuf::from("summary");
        p.push(self.locality_id.to_string());
        p.push(&self.month);
        p.push(&self.asset);
        p.push(format!("{}.json", self.bhk));
        p
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChoroplethPoint {
    pub id: i64,
    pub value: f64,
}

/// Identifies one paint array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaintKey {
    pub metric: PaintMetric,
    pub month: String,
    pub asset: String,
    pub bhk: String,
}

impl PaintKey {
    /// Path relative to the output root.
    pub fn rel_path(&self) -> PathBuf {
        let mut p = PathBuf::from("choropleth");
        p.push(self.metric.name());
        p.push(&self.month);
        p.push(&self.asset);
        p.push(format!("{}.json", self.bhk));
        p
    }
}

/// Everything one run writes, in write order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Sorted by key (month, asset, bhk, locality).
    pub summaries: Vec<SummaryRecord>,
    /// Points within a group are in ascending locality order.
    pub paints: BTreeMap<PaintKey, Vec<ChoroplethPoint>>,
    /// Keys dropped because a component is not a safe path segment.
    pub unsafe_keys: usize,
}

impl Aggregation {
    pub fn point_count(&self) -> usize {
        self.paints.values().map(Vec::len).sum()
    }
}

/// `12 × rent / registered`, defined only when registered > 0, rent is
/// present, and both counts reach `min_sample`.
///
/// Zero is a present value: a rent of `0.0` yields `Some(0.0)` rather than
/// `None`. Likewise [`aggregate`] paints zero medians instead of skipping them.
pub fn rental_yield(
    registered: Option<f64>,
    rent: Option<f64>,
    counts: &Counts,
    min_sample: u32,
) -> Option<f64> {
    let (registered, rent) = (registered?, rent?);
    let qualified = counts.registered >= min_sample && counts.rent >= min_sample;
    (registered > 0.0 && qualified).then(|| 12.0 * rent / registered)
}

/// Non-empty, no separators, not `.` or `..`.
pub fn is_path_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}

pub fn aggregate(tables: &MetricTables, min_sample: u32) -> Aggregation {
    let keys: BTreeSet<&MetricKey> = MetricKind::ALL
        .iter()
        .flat_map(|&k| tables.get(k).records.keys())
        .collect();

    let mut out = Aggregation::default();
    for key in keys {
        if ![&key.month, &key.asset, &key.bhk].iter().all(|s| is_path_segment(s)) {
            warn!(?key, "key is not usable as an output path; skipping");
            out.unsafe_keys += 1;
            continue;
        }

        let record = |kind: MetricKind| tables.get(kind).get(key);
        let count = |kind: MetricKind| record(kind).map_or(0, |r| r.sample_size);
        let value = |kind: MetricKind| record(kind).and_then(|r| r.value);

        let counts = Counts {
            asking: count(MetricKind::Asking),
            registered: count(MetricKind::Registered),
            rent: count(MetricKind::Rent),
        };
        let summary = SummaryRecord {
            month: key.month.clone(),
            asset: key.asset.clone(),
            bhk: key.bhk.clone(),
            locality_id: key.locality_id,
            median_asking: value(MetricKind::Asking),
            median_registered: value(MetricKind::Registered),
            median_rent: value(MetricKind::Rent),
            rental_yield: rental_yield(
                value(MetricKind::Registered),
                value(MetricKind::Rent),
                &counts,
                min_sample,
            ),
            counts,
        };

        let painted = MetricKind::ALL
            .iter()
            .filter(|&&k| summary.counts.get(k) >= min_sample)
            .filter_map(|&k| summary.median(k).map(|v| (PaintMetric::from(k), v)))
            .chain(summary.rental_yield.map(|y| (PaintMetric::Yield, y)));
        for (metric, v) in painted {
            let paint_key = PaintKey {
                metric,
                month: key.month.clone(),
                asset: key.asset.clone(),
                bhk: key.bhk.clone(),
            };
            out.paints.entry(paint_key).or_default().push(ChoroplethPoint {
                id: key.locality_id,
                value: v,
            });
        }

        out.summaries.push(summary);
    }
    out
}

/// Files written by [`write_aggregation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Written {
    pub summaries: usize,
    pub paints: usize,
}

/// Write every summary, then every paint array.
pub fn write_aggregation<S: JsonSink>(sink: &mut S, agg: &Aggregation) -> Result<Written, SinkError> {
    let mut written = Written::default();
    for s in &agg.summaries {
        sink.write_json(&s.rel_path(), s)?;
        written.summaries += 1;
    }
    for (key, points) in &agg.paints {
        sink.write_json(&key.rel_path(), points)?;
        written.paints += 1;
    }
    Ok(written)
}

/// Per-table input counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub keys: usize,
    pub skipped_rows: usize,
    pub duplicate_rows: usize,
}

impl From<&MetricTable> for TableStats {
    fn from(t: &MetricTable) -> Self {
        Self {
            keys: t.records.len(),
            skipped_rows: t.skipped_rows,
            duplicate_rows: t.duplicate_rows,
        }
    }
}

/// What a run read and wrote; printed by the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub out_dir: PathBuf,
    pub min_sample: u32,
    pub inputs: [(MetricKind, TableStats); 3],
    pub unsafe_keys: usize,
    pub written: Written,
    pub points: usize,
}

impl AggregateReport {
    pub fn new(out_dir: PathBuf, min_sample: u32, tables: &MetricTables, agg: &Aggregation, written: Written) -> Self {
        Self {
            out_dir,
            min_sample,
            inputs: MetricKind::ALL.map(|k| (k, TableStats::from(tables.get(k)))),
            unsafe_keys: agg.unsafe_keys,
            written,
            points: agg.point_count(),
        }
    }
}

impl fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let underline = |f: &mut fmt::Formatter<'_>, title: &str| -> fmt::Result {
            writeln!(f, "{title}")?;
            writeln!(f, "{}", "-".repeat(title.len()))
        };

        underline(f, "Inputs")?;
        for (kind, s) in &self.inputs {
            writeln!(
                f,
                "{kind}: {} keys, {} skipped rows, {} duplicate rows",
                s.keys, s.skipped_rows, s.duplicate_rows
            )?;
        }
        writeln!(f)?;

        underline(f, &format!("Outputs (min_sample = {})", self.min_sample))?;
        writeln!(f, "summaries: {}", self.written.summaries)?;
        writeln!(f, "choropleth arrays: {} ({} points)", self.written.paints, self.points)?;
        if self.unsafe_keys > 0 {
            writeln!(f, "keys skipped (unsafe path): {}", self.unsafe_keys)?;
        }
        writeln!(f, "Done. Outputs under: {}", self.out_dir.display())
    }
}

pub fn run(config: &AggregateConfig) -> Result<AggregateReport, MetricsError> {
    let tables = MetricTables::load(&config.metrics_dir())?;
    let agg = aggregate(&tables, config.min_sample);

    let out_dir = config.out_dir();
    let mut sink = DirSink::new(&out_dir);
    let written = write_aggregation(&mut sink, &agg)?;
    info!(
        summaries = written.summaries,
        paints = written.paints,
        points = agg.point_count(),
        unsafe_keys = agg.unsafe_keys,
        "wrote aggregation"
    );
    Ok(AggregateReport::new(out_dir, config.min_sample, &tables, &agg, written))
}
