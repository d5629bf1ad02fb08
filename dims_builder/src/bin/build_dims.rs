use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dims_builder::DimsConfig;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Build frontend/dims.json from the CSV masters")]
struct Cli {
    /// Project root (default: $DASHBOARD_ROOT, then the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// TOML file overriding encodings, city target and orphan policy
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Masters directory (default: <root>/data/masters)
    #[arg(long, value_name = "DIR")]
    masters: Option<PathBuf>,

    /// Output file (default: <root>/frontend/dims.json)
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    shared_utils::logging::init(cli.verbose);
    shared_utils::env::load_dotenv();

    let root = shared_utils::env::resolve_root(cli.root);
    let mut config = match &cli.config {
        Some(path) => DimsConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => DimsConfig::default(),
    };
    if let Some(dir) = cli.masters {
        config.masters_dir = dir;
    }
    if let Some(out) = cli.out {
        config.out_path = out;
    }
    let config = config.rooted(&root);

    let report = dims_builder::run(&config).context("building dims")?;
    info!(?report, "done");
    println!("Wrote {}", config.out_path.display());
    Ok(())
}
