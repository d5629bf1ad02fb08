use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_pipeline::{FakeConfig, Month, fake};

#[derive(Parser)]
#[command(version, about = "Generate fake metric CSVs from frontend/dims.json")]
struct Cli {
    /// Project root (default: $DASHBOARD_ROOT, then the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Month to stamp, YYYY-MM (default: current month)
    #[arg(long)]
    month: Option<String>,

    /// Asset type codes to include (default: all in dims)
    #[arg(long, num_args = 1..)]
    assets: Option<Vec<String>>,

    /// BHK codes to include (default: all in dims)
    #[arg(long, num_args = 1..)]
    bhk: Option<Vec<String>>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// City ID for localities without one
    #[arg(long, default_value_t = 13)]
    cityid: i64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    shared_utils::logging::init(cli.verbose);
    shared_utils::env::load_dotenv();

    let root = shared_utils::env::resolve_root(cli.root);
    let today = chrono::Local::now().date_naive();
    let mut config = FakeConfig::for_root(&root, today);
    if let Some(m) = cli.month {
        config.options.month = m.parse::<Month>()?;
    }
    config.options.assets = cli.assets;
    config.options.bhk = cli.bhk;
    config.options.city_id = cli.cityid;
    config.seed = cli.seed;

    let written = fake::run(&config).context("generating fake metrics")?;
    println!("Wrote:");
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}
