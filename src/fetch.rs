//! Download orchestration: walks the monthly archives newest-first and
//! files each rapid game's PGN under its outcome folder.

use crate::api::{ApiGame, ArchiveClient};
use crate::record::GameOutcome;

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Only rapid games are downloaded; other pools mix in time pressure
/// effects the report is not meant to capture.
pub const TIME_CLASS: &str = "rapid";

/// Creates the win/loss/draw folders under `output_dir`.
pub fn setup_directories(output_dir: &Path) -> Result<()> {
    for outcome in GameOutcome::ALL {
        let path = output_dir.join(outcome.folder_name());
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }
    Ok(())
}

/// Writes the game's PGN as `game_<id>.pgn` in the outcome folder.
/// Returns false when the entry carries no PGN body.
pub fn save_game(game: &ApiGame, outcome: GameOutcome, output_dir: &Path) -> Result<bool> {
    let Some(pgn) = game.pgn.as_deref() else {
        warn!("Game {} has no PGN body, skipping", game.url);
        return Ok(false);
    };

    let path = output_dir
        .join(outcome.folder_name())
        .join(format!("game_{}.pgn", game.game_id()));
    fs::write(&path, pgn).with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(true)
}

/// Downloads up to `target_count` finished rapid games for `username`.
///
/// Archives are visited newest-first and each month's games are taken in
/// end-time order, newest first, so the run collects the player's most
/// recent games. HTTP failures abort the run; individual games that
/// cannot be classified or stored are skipped. Returns the number saved.
pub fn run(
    client: &ArchiveClient,
    username: &str,
    target_count: usize,
    output_dir: &Path,
) -> Result<usize> {
    setup_directories(output_dir)?;

    let archives = client.archives(username)?;
    info!("Found {} archives for '{}'", archives.len(), username);

    let mut saved = 0usize;
    for archive_url in archives.iter().rev() {
        if saved >= target_count {
            break;
        }

        info!("Checking archive: {archive_url}");
        let mut games = client.monthly_games(archive_url)?;
        games.sort_by(|a, b| b.end_time.cmp(&a.end_time));

        for game in games.iter().filter(|g| g.time_class == TIME_CLASS) {
            if saved >= target_count {
                break;
            }

            let Some(outcome) = game.outcome_for(username) else {
                continue;
            };

            if save_game(game, outcome, output_dir)? {
                saved += 1;
                info!(
                    "[{saved}/{target_count}] Saved {}: {}",
                    outcome.folder_name(),
                    game.url
                );
            }
        }
    }

    Ok(saved)
}
