use clap::{Parser, command};
use std::path::PathBuf;

/// Compare time-averaged leading-edge surface pressure across lip configurations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Root directory holding the case folders, `data/` and `figures/`
    #[arg(default_value = ".")]
    pub root_dir: PathBuf,

    /// YAML file overriding the built-in analysis parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write the summary table as CSV
    #[arg(short, long)]
    pub table: Option<PathBuf>,

    /// Skip rendering the comparison figure
    #[arg(long)]
    pub no_plot: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn get_args() -> Args {
    Args::parse()
}
