mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use migrator_engine::{Pipeline, RunSummary};
use migrator_logging::{migrate_error, migrate_warn};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(migrator_logging::level_for(cli.verbose), cli.log_file.as_deref());

    match run(&cli) {
        Ok(summary) => {
            let failures = summary.posts_failed
                + summary.downloads.as_ref().map_or(0, |report| report.failed());
            if failures > 0 {
                migrate_warn!("{failures} item(s) failed; see the log above for details");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            migrate_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = cli.to_config();
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let summary = runtime
        .block_on(Pipeline::new(&config).run())
        .with_context(|| format!("migration of {} failed", config.export_path.display()))?;
    Ok(summary)
}
