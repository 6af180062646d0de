use crate::openings;
use crate::record::{GameOutcome, GameRecord};

use std::fmt;

/// Side the tracked player held, matched case-insensitively against the
/// White and Black headers. `Unknown` when neither header matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPlayed {
    White,
    Black,
    Unknown,
}

impl ColorPlayed {
    pub fn derive(record: &GameRecord, username: &str) -> Self {
        let matches = |header: &Option<String>| {
            header
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(username))
        };

        if matches(&record.white) {
            ColorPlayed::White
        } else if matches(&record.black) {
            ColorPlayed::Black
        } else {
            ColorPlayed::Unknown
        }
    }
}

impl fmt::Display for ColorPlayed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorPlayed::White => "White",
            ColorPlayed::Black => "Black",
            ColorPlayed::Unknown => "Unknown",
        })
    }
}

/// Game length bucket over full-move counts: `< 20` Quick, `20..=40`
/// Medium, `> 40` Long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLength {
    Quick,
    Medium,
    Long,
}

impl GameLength {
    pub fn classify(move_count: u32) -> Self {
        match move_count {
            0..20 => GameLength::Quick,
            20..=40 => GameLength::Medium,
            _ => GameLength::Long,
        }
    }
}

impl fmt::Display for GameLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameLength::Quick => "Quick",
            GameLength::Medium => "Medium",
            GameLength::Long => "Long",
        })
    }
}

/// How hard a lost game was fought, bucketed by full-move count: `< 15`
/// Quick, `15..=29` Standard, `>= 30` Well-Fought. Loss games only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossQuality {
    Quick,
    Standard,
    WellFought,
}

impl LossQuality {
    pub fn classify(outcome: Option<GameOutcome>, move_count: u32) -> Option<Self> {
        if outcome != Some(GameOutcome::Loss) {
            return None;
        }
        Some(match move_count {
            0..15 => LossQuality::Quick,
            15..30 => LossQuality::Standard,
            _ => LossQuality::WellFought,
        })
    }
}

impl fmt::Display for LossQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LossQuality::Quick => "Quick Loss",
            LossQuality::Standard => "Standard Loss",
            LossQuality::WellFought => "Well-Fought Loss",
        })
    }
}

/// Categorized reason the game ended, from substring-matching the
/// free-text Termination header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Resignation,
    Timeout,
    Abandoned,
    DrawAgreement,
    DrawRepetition,
    Stalemate,
    InsufficientMaterial,
    Other,
    Unknown,
}

impl Termination {
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Termination::Unknown;
        };
        let text = text.to_lowercase();

        // "timeout vs insufficient material" must land on Timeout, so the
        // timeout check comes first.
        if text.contains("checkmate") {
            Termination::Checkmate
        } else if text.contains("resignation") {
            Termination::Resignation
        } else if text.contains("timeout") {
            Termination::Timeout
        } else if text.contains("abandoned") {
            Termination::Abandoned
        } else if text.contains("agreement") {
            Termination::DrawAgreement
        } else if text.contains("repetition") {
            Termination::DrawRepetition
        } else if text.contains("stalemate") {
            Termination::Stalemate
        } else if text.contains("insufficient") {
            Termination::InsufficientMaterial
        } else {
            Termination::Other
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Termination::Checkmate => "Checkmate",
            Termination::Resignation => "Resignation",
            Termination::Timeout => "Timeout",
            Termination::Abandoned => "Abandoned",
            Termination::DrawAgreement => "Draw by Agreement",
            Termination::DrawRepetition => "Draw by Repetition",
            Termination::Stalemate => "Stalemate",
            Termination::InsufficientMaterial => "Insufficient Material",
            Termination::Other => "Other",
            Termination::Unknown => "Unknown",
        })
    }
}

/// Opponent Elo minus the tracked player's Elo. Needs both ratings and a
/// known color, otherwise the orientation is undefined.
pub fn rating_diff(record: &GameRecord, color: ColorPlayed) -> Option<i32> {
    let white = record.white_elo? as i32;
    let black = record.black_elo? as i32;
    match color {
        ColorPlayed::White => Some(black - white),
        ColorPlayed::Black => Some(white - black),
        ColorPlayed::Unknown => None,
    }
}

/// One report row: derived features plus the raw header passthrough.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    pub filename: String,
    pub folder: String,
    pub color: ColorPlayed,
    pub rating_diff: Option<i32>,
    pub game_length: GameLength,
    pub opening_name: &'static str,
    pub loss_quality: Option<LossQuality>,
    pub termination_type: Termination,
    pub record: GameRecord,
}

pub const CSV_HEADERS: [&str; 22] = [
    "Filename",
    "Folder",
    "ColorPlayed",
    "RatingDiff",
    "MoveCount",
    "GameLength",
    "OpeningName",
    "LossQuality",
    "TerminationType",
    "Event",
    "Site",
    "Date",
    "White",
    "Black",
    "Result",
    "WhiteElo",
    "BlackElo",
    "TimeControl",
    "ECO",
    "Termination",
    "Link",
    "ParseError",
];

impl FeatureRow {
    /// Derives every feature from one stored record. Pure in the record,
    /// its folder, and the tracked handle.
    pub fn derive(filename: String, folder: String, record: GameRecord, username: &str) -> Self {
        let outcome = GameOutcome::from_folder_name(&folder);
        let color = ColorPlayed::derive(&record, username);

        Self {
            filename,
            color,
            rating_diff: rating_diff(&record, color),
            game_length: GameLength::classify(record.move_count),
            opening_name: openings::opening_name(record.eco.as_deref()),
            loss_quality: LossQuality::classify(outcome, record.move_count),
            termination_type: Termination::classify(record.termination.as_deref()),
            folder,
            record,
        }
    }

    /// Renders the row in `CSV_HEADERS` order; absent values become
    /// empty cells.
    pub fn csv_record(&self) -> Vec<String> {
        fn opt_str(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }
        fn opt_display<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map(T::to_string).unwrap_or_default()
        }

        vec![
            self.filename.clone(),
            self.folder.clone(),
            self.color.to_string(),
            opt_display(&self.rating_diff),
            self.record.move_count.to_string(),
            self.game_length.to_string(),
            self.opening_name.to_string(),
            opt_display(&self.loss_quality),
            self.termination_type.to_string(),
            opt_str(&self.record.event),
            opt_str(&self.record.site),
            opt_str(&self.record.date),
            opt_str(&self.record.white),
            opt_str(&self.record.black),
            opt_str(&self.record.result),
            opt_display(&self.record.white_elo),
            opt_display(&self.record.black_elo),
            opt_str(&self.record.time_control),
            opt_str(&self.record.eco),
            opt_str(&self.record.termination),
            opt_str(&self.record.link),
            opt_str(&self.record.parse_error),
        ]
    }
}
