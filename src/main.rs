use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use heartbeatgen::{generate, Cli, GenerateOptions, RunStats};

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    println!("Processing input sheet: {}", cli.input);

    let options = GenerateOptions {
        input: cli.input,
        output: cli.output,
        master: cli.master,
        stamp_new_only: cli.stamp_new_only,
    };

    let stats = generate(&options)?;

    println!("Validation passed for {} rows", stats.rows_validated);
    println!("Monitor configuration written to: {}", options.output);
    println!(
        "Master sheet updated: {} rows ({} new)",
        stats.master_rows_after,
        stats.master_rows_after - stats.master_rows_before
    );

    if cli.stats {
        print_detailed_stats(&stats);
    }

    Ok(())
}

fn init_logging() {
    let env = Env::default().filter_or("RUST_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .format_target(false)
        .try_init();
}

fn print_detailed_stats(stats: &RunStats) {
    println!("\nDetailed Statistics:");
    println!("- Rows validated: {}", stats.rows_validated);
    println!("- Host addresses checked: {}", stats.hosts_checked);
    println!("- Master rows before run: {}", stats.master_rows_before);
    println!("- Master rows after run: {}", stats.master_rows_after);
}
