//! End-to-end: store PGNs the way the fetcher lays them out, run the
//! analyzer, and check the CSV.

use chess_analytics::api::{ApiGame, PlayerSide};
use chess_analytics::fetch;
use chess_analytics::report;
use std::fs;
use std::path::Path;

fn api_game(id: u32, pgn: &str, white: &str, black: &str, white_result: &str) -> ApiGame {
    ApiGame {
        url: format!("https://www.chess.com/game/live/{id}"),
        pgn: Some(pgn.to_string()),
        time_class: "rapid".to_string(),
        end_time: 1_700_000_000 + id as u64,
        white: PlayerSide {
            username: white.to_string(),
            result: white_result.to_string(),
        },
        black: PlayerSide {
            username: black.to_string(),
            result: if white_result == "win" {
                "resigned".to_string()
            } else {
                "win".to_string()
            },
        },
    }
}

const WIN_PGN: &str = r#"[Event "Live Chess"]
[Site "Chess.com"]
[Date "2024.03.01"]
[White "magnuscarlsen"]
[Black "opponent"]
[Result "1-0"]
[WhiteElo "2830"]
[BlackElo "2750"]
[ECO "C65"]
[TimeControl "600"]
[Termination "magnuscarlsen won by resignation"]

1. e4 e5 2. Nf3 Nc6 3. Bb5 Nf6 1-0
"#;

const LOSS_PGN: &str = r#"[Event "Live Chess"]
[White "opponent"]
[Black "magnuscarlsen"]
[Result "1-0"]
[WhiteElo "2740"]
[BlackElo "2830"]
[ECO "B20"]
[Termination "opponent won by checkmate"]

1. e4 c5 2. Nf3 d6 3. d4 cxd4 4. Nxd4 Nf6 5. Nc3 a6 6. Bg5 e6 7. f4 Be7
8. Qf3 Qc7 9. O-O-O Nbd7 10. g4 b5 11. Bxf6 Nxf6 12. g5 Nd7 13. f5 Bxg5+
14. Kb1 Ne5 15. Qh5 Qe7 16. Nxe6 Bxe6 17. fxe6 g6 18. exf7+ Qxf7 1-0
"#;

fn store_games(dir: &Path, games: &[(ApiGame, chess_analytics::record::GameOutcome)]) {
    fetch::setup_directories(dir).unwrap();
    for (game, outcome) in games {
        assert!(fetch::save_game(game, *outcome, dir).unwrap());
    }
}

#[test]
fn analyzer_yields_one_row_per_stored_game() {
    use chess_analytics::record::GameOutcome;

    let dir = tempfile::tempdir().unwrap();
    store_games(
        dir.path(),
        &[
            (
                api_game(1, WIN_PGN, "magnuscarlsen", "opponent", "win"),
                GameOutcome::Win,
            ),
            (
                api_game(2, LOSS_PGN, "opponent", "magnuscarlsen", "win"),
                GameOutcome::Loss,
            ),
        ],
    );

    let rows = report::collect_rows(dir.path(), "magnuscarlsen").unwrap();
    assert_eq!(rows.len(), 2);

    let output = dir.path().join("chess_analytics.csv");
    report::write_csv(&rows, &output).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Filename,Folder,ColorPlayed,RatingDiff,MoveCount,"));
}

#[test]
fn derived_columns_match_the_stored_games() {
    use chess_analytics::features::{ColorPlayed, GameLength, Termination};
    use chess_analytics::record::GameOutcome;

    let dir = tempfile::tempdir().unwrap();
    store_games(
        dir.path(),
        &[
            (
                api_game(1, WIN_PGN, "magnuscarlsen", "opponent", "win"),
                GameOutcome::Win,
            ),
            (
                api_game(2, LOSS_PGN, "opponent", "magnuscarlsen", "win"),
                GameOutcome::Loss,
            ),
        ],
    );

    let rows = report::collect_rows(dir.path(), "magnuscarlsen").unwrap();

    let loss = rows.iter().find(|r| r.folder == "loss").unwrap();
    assert_eq!(loss.filename, "game_2.pgn");
    assert_eq!(loss.color, ColorPlayed::Black);
    assert_eq!(loss.rating_diff, Some(-90));
    assert_eq!(loss.record.move_count, 18);
    assert_eq!(loss.game_length, GameLength::Quick);
    assert_eq!(loss.opening_name, "Sicilian Defense");
    assert!(loss.loss_quality.is_some());
    assert_eq!(loss.termination_type, Termination::Checkmate);

    let win = rows.iter().find(|r| r.folder == "win").unwrap();
    assert_eq!(win.filename, "game_1.pgn");
    assert_eq!(win.color, ColorPlayed::White);
    assert_eq!(win.rating_diff, Some(-80));
    assert_eq!(win.record.move_count, 3);
    assert_eq!(win.opening_name, "Ruy Lopez: Berlin Defense");
    assert_eq!(win.loss_quality, None);
    assert_eq!(win.termination_type, Termination::Resignation);
}

#[test]
fn rows_sort_lexicographically_by_path() {
    use chess_analytics::record::GameOutcome;

    let dir = tempfile::tempdir().unwrap();
    store_games(
        dir.path(),
        &[
            (
                api_game(9, WIN_PGN, "magnuscarlsen", "opponent", "win"),
                GameOutcome::Win,
            ),
            (
                api_game(3, WIN_PGN, "magnuscarlsen", "opponent", "win"),
                GameOutcome::Draw,
            ),
            (
                api_game(5, LOSS_PGN, "opponent", "magnuscarlsen", "win"),
                GameOutcome::Loss,
            ),
        ],
    );

    let rows = report::collect_rows(dir.path(), "magnuscarlsen").unwrap();
    let folders: Vec<&str> = rows.iter().map(|r| r.folder.as_str()).collect();

    // draw/ < loss/ < win/ lexicographically.
    assert_eq!(folders, ["draw", "loss", "win"]);
}
