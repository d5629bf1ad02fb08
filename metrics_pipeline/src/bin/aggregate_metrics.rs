use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_pipeline::{AggregateConfig, aggregate, config::DEFAULT_MIN_SAMPLE};

#[derive(Parser)]
#[command(version, about = "Join metric CSVs into summary and choropleth JSON")]
struct Cli {
    /// Data directory containing metrics/ (default: <DASHBOARD_ROOT>/data)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Minimum sample size for a value to be painted
    #[arg(long, alias = "min_sample", default_value_t = DEFAULT_MIN_SAMPLE)]
    min_sample: u32,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    shared_utils::logging::init(cli.verbose);
    shared_utils::env::load_dotenv();

    let data_dir = match cli.root {
        Some(dir) => dir,
        None => shared_utils::env::resolve_root(None).join("data"),
    };
    let mut config = AggregateConfig::new(data_dir);
    config.min_sample = cli.min_sample;

    let report = aggregate::run(&config)
        .with_context(|| format!("aggregating metrics under {}", config.data_dir.display()))?;
    print!("{report}");
    Ok(())
}
