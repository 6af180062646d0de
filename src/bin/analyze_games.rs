//! Parses downloaded PGN files and writes a CSV of per-game analytics.

use anyhow::Result;
use chess_analytics::report;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "analyze_games")]
#[command(about = "Analyze downloaded chess PGN files and generate CSV analytics")]
struct Cli {
    /// Chess.com username, used for color and rating calculations
    username: String,

    /// Input directory with PGN files
    #[arg(long, default_value = "chess_games")]
    input: PathBuf,

    /// Output CSV file
    #[arg(long, default_value = "chess_analytics.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!("Scanning '{}' for PGN files...", cli.input.display());
    let rows = report::collect_rows(&cli.input, &cli.username)?;

    if rows.is_empty() {
        println!("No PGN files found.");
        return Ok(());
    }

    println!("Found {} games. Generating CSV...", rows.len());
    report::write_csv(&rows, &cli.output)?;

    println!(
        "Generated '{}' with {} records.",
        cli.output.display(),
        rows.len()
    );
    Ok(())
}
