mod analytics;
mod args;
mod config;
mod error;
mod logs;
mod plot;
mod runner;

use crate::args::ShardPlotArgs;
use crate::config::PlotConfig;
use crate::error::AnalyzerError;
use crate::runner::PlotRunner;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

fn run(args: ShardPlotArgs) -> Result<(), AnalyzerError> {
    let config = PlotConfig::load(args.config.as_deref())?;
    let mut runner = PlotRunner::new(args, config);
    runner.run()
}

fn main() -> ExitCode {
    let args = ShardPlotArgs::parse();
    // Charts and counts go to stdout, logs to stderr.
    Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO")))
        .init();

    match run(args) {
        Ok(()) => {
            info!("Finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}
