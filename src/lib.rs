//! Chess.com game downloader and per-game analytics.
//!
//! Two binaries share this crate: `fetch_games` pulls a player's finished
//! rapid games from the Chess.com public API and files each PGN under a
//! win/loss/draw directory; `analyze_games` parses the stored PGNs and
//! emits one CSV row of derived features per game.

pub mod api;
pub mod diagnostics;
pub mod features;
pub mod fetch;
pub mod openings;
pub mod record;
pub mod report;
pub mod visitor;
