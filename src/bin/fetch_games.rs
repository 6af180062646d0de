//! Downloads a player's rapid games from Chess.com and files each PGN
//! under win/loss/draw folders.

use anyhow::Result;
use chess_analytics::api::ArchiveClient;
use chess_analytics::fetch;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fetch_games")]
#[command(about = "Download rapid chess games from Chess.com and organize by result")]
struct Cli {
    /// Chess.com username to download games for
    username: String,

    /// Number of games to download
    #[arg(long, default_value_t = 50)]
    count: usize,

    /// Output directory
    #[arg(long, default_value = "chess_games")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!(
        "Downloading last {} rapid games for '{}'...",
        cli.count, cli.username
    );

    let client = ArchiveClient::new()?;
    let saved = fetch::run(&client, &cli.username, cli.count, &cli.output)?;

    println!(
        "Done! Downloaded {} games to '{}'",
        saved,
        cli.output.display()
    );
    Ok(())
}
