use log::warn;

/// One finished game as stored on disk, immutable once built.
///
/// Header fields stay `None` when the tag is absent; Elo values are only
/// set when the header parsed as an integer. `move_count` counts full
/// moves of the mainline (two plies per move, rounded up).
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,

    pub white_elo: Option<u32>,
    pub black_elo: Option<u32>,

    pub eco: Option<String>,
    pub opening: Option<String>,

    pub termination: Option<String>,
    pub time_control: Option<String>,
    pub link: Option<String>,

    pub movetext: String,
    pub move_count: u32,

    /// `None` for cleanly parsed games, accumulated messages otherwise.
    pub parse_error: Option<String>,
}

/// Result of a game from the tracked player's point of view. Doubles as
/// the storage folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    pub const ALL: [GameOutcome; 3] = [GameOutcome::Win, GameOutcome::Loss, GameOutcome::Draw];

    pub fn folder_name(self) -> &'static str {
        match self {
            GameOutcome::Win => "win",
            GameOutcome::Loss => "loss",
            GameOutcome::Draw => "draw",
        }
    }

    pub fn from_folder_name(name: &str) -> Option<Self> {
        match name {
            "win" => Some(GameOutcome::Win),
            "loss" => Some(GameOutcome::Loss),
            "draw" => Some(GameOutcome::Draw),
            _ => None,
        }
    }

    /// Maps a Chess.com per-player result code to an outcome.
    ///
    /// Codes outside the published set classify as draw, matching how the
    /// archive treats aborted and adjudicated oddities.
    pub fn from_api_result(code: &str, game_url: &str) -> Self {
        match code {
            "win" => GameOutcome::Win,
            "checkmated" | "timeout" | "resigned" | "abandoned" => GameOutcome::Loss,
            "agreed" | "repetition" | "stalemate" | "insufficient" | "50move"
            | "timevsinsufficient" => GameOutcome::Draw,
            other => {
                warn!("Unknown result code '{other}' for game {game_url}, filing as draw");
                GameOutcome::Draw
            }
        }
    }
}
