//! Print the contracts OpenAPI document as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use sitegen_contracts::ContractsDoc;
use sitegen_contracts::telemetry::init_tracing;
use tracing::{info, warn};
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the contracts OpenAPI document as pretty-printed JSON",
    version
)]
struct CliArgs {
    /// Destination file. Writes to stdout when omitted.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(err) = init_tracing() {
        warn!(error = %err, "tracing init failed");
    }

    let args = CliArgs::parse();
    let json = ContractsDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")?;

    match args.output {
        Some(path) => {
            let mut file = File::create(&path)
                .wrap_err_with(|| format!("failed to create {}", path.display()))?;
            writeln!(file, "{json}")
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote OpenAPI document");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").wrap_err("failed to write to stdout")?;
        }
    }
    Ok(())
}
