use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Validate the Mumbai GeoJSON boundary layers")]
struct Cli {
    /// Directory holding the three .geojson layers (default: <DASHBOARD_ROOT>/data/geo)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Exit with status 2 when blocking errors are found
    #[arg(long)]
    strict: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    shared_utils::logging::init(cli.verbose);
    shared_utils::env::load_dotenv();

    let root = match cli.root {
        Some(dir) => dir,
        None => shared_utils::env::resolve_root(None).join("data").join("geo"),
    };

    let report = match geo_validator::validate_dir(&root) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("FATAL: {:#}", anyhow::Error::from(e));
            return Ok(ExitCode::FAILURE);
        }
    };

    print!("{report}");

    if cli.strict && report.has_errors() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
