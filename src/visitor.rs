use crate::diagnostics::ErrorAccumulator;
use crate::record::GameRecord;

use pgn_reader::{Nag, Outcome, RawComment, RawTag, SanPlus, Skip, Visitor};
use std::fmt::Write;
use std::mem;
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader).
///
/// Captures the known header tags (first value wins, unknown tags are
/// ignored), accumulates the mainline movetext with full-move numbering
/// and `{ ... }` comments, and counts plies. The finished record lands in
/// `current_game` when `end_game` fires.
pub struct GameVisitor {
    headers: HeaderFields,
    movetext_buffer: String,
    ply_count: u32,
    result_marker: Option<String>,
    parse_error: ErrorAccumulator,
    pub current_game: Option<GameRecord>,
}

#[derive(Default)]
struct HeaderFields {
    event: String,
    site: String,
    date: String,
    white: String,
    black: String,
    result: String,
    white_elo: String,
    black_elo: String,
    eco: String,
    opening: String,
    termination: String,
    time_control: String,
    link: String,
}

impl HeaderFields {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn opt_take(field: &mut String) -> Option<String> {
        if field.is_empty() {
            None
        } else {
            Some(mem::take(field))
        }
    }

    fn set_known_tag(&mut self, key: &[u8], value: RawTag<'_>) {
        let slot: &mut String = match key {
            b"Event" => &mut self.event,
            b"Site" => &mut self.site,
            b"Date" => &mut self.date,
            b"White" => &mut self.white,
            b"Black" => &mut self.black,
            b"Result" => &mut self.result,
            b"WhiteElo" => &mut self.white_elo,
            b"BlackElo" => &mut self.black_elo,
            b"ECO" => &mut self.eco,
            b"Opening" => &mut self.opening,
            b"Termination" => &mut self.termination,
            b"TimeControl" => &mut self.time_control,
            b"Link" => &mut self.link,
            _ => return,
        };

        if !slot.is_empty() {
            return;
        }

        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return;
        }

        *slot = String::from_utf8_lossy(bytes).into_owned();
    }
}

impl GameVisitor {
    pub fn new() -> Self {
        Self {
            headers: HeaderFields::default(),
            movetext_buffer: String::new(),
            ply_count: 0,
            result_marker: None,
            parse_error: ErrorAccumulator::default(),
            current_game: None,
        }
    }

    fn parse_uinteger_field(
        raw: &str,
        label: &str,
        parse_error: &mut ErrorAccumulator,
    ) -> Option<u32> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        match s.parse::<u32>() {
            Ok(v) => Some(v),
            Err(_) => {
                parse_error.push_conversion_error(label, s);
                None
            }
        }
    }

    fn build_game_record(&mut self) {
        let white_elo = Self::parse_uinteger_field(
            &self.headers.white_elo,
            "WhiteElo",
            &mut self.parse_error,
        );
        let black_elo = Self::parse_uinteger_field(
            &self.headers.black_elo,
            "BlackElo",
            &mut self.parse_error,
        );

        let movetext = mem::take(&mut self.movetext_buffer);
        let movetext = if movetext.trim().len() != movetext.len() {
            movetext.trim().to_string()
        } else {
            movetext
        };

        self.current_game = Some(GameRecord {
            event: HeaderFields::opt_take(&mut self.headers.event),
            site: HeaderFields::opt_take(&mut self.headers.site),
            date: HeaderFields::opt_take(&mut self.headers.date),
            white: HeaderFields::opt_take(&mut self.headers.white),
            black: HeaderFields::opt_take(&mut self.headers.black),
            result: HeaderFields::opt_take(&mut self.headers.result)
                .or_else(|| self.result_marker.take()),
            white_elo,
            black_elo,
            eco: HeaderFields::opt_take(&mut self.headers.eco),
            opening: HeaderFields::opt_take(&mut self.headers.opening),
            termination: HeaderFields::opt_take(&mut self.headers.termination),
            time_control: HeaderFields::opt_take(&mut self.headers.time_control),
            link: HeaderFields::opt_take(&mut self.headers.link),
            movetext,
            // Two plies per full move, a trailing white move still counts.
            move_count: self.ply_count.div_ceil(2),
            parse_error: self.parse_error.take(),
        });
    }

    fn finalize_game(&mut self) {
        self.build_game_record();
    }

    /// Builds the record anyway when the PGN stream errored mid-game, so
    /// the file still yields a row carrying the error message.
    pub fn finalize_game_with_error(&mut self, error_msg: String) {
        self.parse_error.push(&error_msg);
        self.build_game_record();
    }
}

impl Default for GameVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for GameVisitor {
    type Tags = ();
    type Movetext = String;
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.headers.clear();
        self.movetext_buffer.clear();
        self.ply_count = 0;
        self.result_marker = None;
        self.parse_error = ErrorAccumulator::default();
        self.current_game = None;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.headers.set_known_tag(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(String::with_capacity(256))
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn nag(&mut self, _: &mut Self::Movetext, _: Nag) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        if !movetext.is_empty() {
            movetext.push(' ');
        }

        if self.ply_count.is_multiple_of(2) {
            let _ = write!(movetext, "{}. ", (self.ply_count / 2) + 1);
        }

        let _ = write!(movetext, "{}", san);
        self.ply_count += 1;
        ControlFlow::Continue(())
    }

    fn comment(
        &mut self,
        movetext: &mut Self::Movetext,
        comment: RawComment<'_>,
    ) -> ControlFlow<Self::Output> {
        let comment_str = String::from_utf8_lossy(comment.as_bytes());

        if !movetext.is_empty() {
            movetext.push(' ');
        }
        movetext.push('{');
        movetext.push(' ');
        movetext.push_str(comment_str.trim());
        movetext.push(' ');
        movetext.push('}');

        ControlFlow::Continue(())
    }

    fn outcome(
        &mut self,
        _movetext: &mut Self::Movetext,
        outcome: Outcome,
    ) -> ControlFlow<Self::Output> {
        self.result_marker = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        self.movetext_buffer = movetext;
        self.finalize_game();
    }
}
