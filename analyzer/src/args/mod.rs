pub mod defaults;
pub mod examples;
pub mod kind;
pub mod output;

use clap::Parser;
use kind::PlotKindCommand;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ShardPlotArgs {
    /// Plot kind
    #[command(subcommand)]
    pub kind: PlotKindCommand,

    /// TOML file with analysis and chart defaults
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
}
