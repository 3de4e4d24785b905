use clap::Parser;

pub const DEFAULT_INPUT: &str = "heartbeat_config_input.csv";
pub const DEFAULT_OUTPUT: &str = "heartbeat.yml";
pub const DEFAULT_MASTER: &str = "heartbeat_master.csv";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "heartbeatgen")]
#[command(about = "Generates a heartbeat monitor configuration from a host sheet")]
pub struct Cli {
    /// Path to the input host sheet (CSV)
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: String,

    /// Path to the rendered monitor configuration (overwritten each run)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Path to the cumulative master sheet
    #[arg(long, value_name = "FILE", default_value = DEFAULT_MASTER)]
    pub master: String,

    /// Stamp only the newly appended master rows with this run's date and
    /// time, preserving prior stamps (default re-stamps every row)
    #[arg(long)]
    pub stamp_new_only: bool,

    /// Show detailed processing statistics
    #[arg(long)]
    pub stats: bool,
}
