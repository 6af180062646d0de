//! Analyzer: parses every stored PGN and writes the per-game CSV report.

use crate::features::{CSV_HEADERS, FeatureRow};
use crate::record::GameRecord;
use crate::visitor::GameVisitor;

use anyhow::{Context, Result};
use log::warn;
use pgn_reader::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// PGN files one level below the input directory, lexicographically
/// sorted so the report row order does not depend on platform iteration
/// order.
pub fn enumerate_pgn_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = input_dir.join("*").join("*.pgn");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("Input path '{}' is not valid UTF-8", input_dir.display()))?;

    let mut paths = Vec::new();
    for entry in glob::glob(pattern).context("Invalid input glob pattern")? {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => warn!("Skipping unreadable directory entry: {e}"),
        }
    }

    paths.sort();
    Ok(paths)
}

/// Parses one stored PGN file. Never fails: IO and PGN errors produce a
/// record whose `parse_error` carries the message, so the file still
/// contributes a report row.
pub fn parse_game_file(path: &Path) -> GameRecord {
    let mut visitor = GameVisitor::new();

    match File::open(path) {
        Ok(file) => {
            let mut reader = Reader::new(BufReader::new(file));
            if let Err(e) = reader.read_game(&mut visitor) {
                visitor.finalize_game_with_error(format!("PGN read error: {e}"));
            }
        }
        Err(e) => {
            visitor.finalize_game_with_error(format!("Failed to open file: {e}"));
        }
    }

    visitor.current_game.take().unwrap_or_else(|| GameRecord {
        parse_error: Some("Empty PGN file".to_string()),
        ..GameRecord::default()
    })
}

/// One FeatureRow per stored PGN under `input_dir`, in filename order.
pub fn collect_rows(input_dir: &Path, username: &str) -> Result<Vec<FeatureRow>> {
    let mut rows = Vec::new();

    for path in enumerate_pgn_files(input_dir)? {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let folder = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let record = parse_game_file(&path);
        if let Some(error) = &record.parse_error {
            warn!("{filename}: {error}");
        }

        rows.push(FeatureRow::derive(filename, folder, record, username));
    }

    Ok(rows)
}

/// Writes the report with a header row and one row per game.
pub fn write_csv(rows: &[FeatureRow], output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create '{}'", output.display()))?;

    writer
        .write_record(CSV_HEADERS)
        .context("Failed to write CSV header")?;
    for row in rows {
        writer
            .write_record(row.csv_record())
            .with_context(|| format!("Failed to write row for '{}'", row.filename))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{ColorPlayed, GameLength, LossQuality, Termination};
    use std::fs;

    const WIN_PGN: &str = r#"[Event "Live Chess"]
[Site "Chess.com"]
[Date "2024.03.01"]
[White "hero"]
[Black "villain"]
[Result "1-0"]
[WhiteElo "1500"]
[BlackElo "1620"]
[ECO "B90"]
[TimeControl "600"]
[Termination "hero won by resignation"]

1. e4 c5 2. Nf3 d6 1-0
"#;

    const LOSS_PGN: &str = r#"[Event "Live Chess"]
[White "villain"]
[Black "hero"]
[Result "1-0"]
[Termination "villain won by checkmate"]

1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0
"#;

    fn write_fixture(dir: &Path, folder: &str, name: &str, pgn: &str) {
        let folder = dir.join(folder);
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join(name), pgn).unwrap();
    }

    #[test]
    fn test_enumeration_is_lexicographic_across_folders() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "win", "game_b.pgn", WIN_PGN);
        write_fixture(dir.path(), "draw", "game_c.pgn", WIN_PGN);
        write_fixture(dir.path(), "loss", "game_a.pgn", LOSS_PGN);

        let names: Vec<String> = enumerate_pgn_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| {
                format!(
                    "{}/{}",
                    p.parent().unwrap().file_name().unwrap().to_string_lossy(),
                    p.file_name().unwrap().to_string_lossy()
                )
            })
            .collect();

        assert_eq!(
            names,
            ["draw/game_c.pgn", "loss/game_a.pgn", "win/game_b.pgn"]
        );
    }

    #[test]
    fn test_collect_rows_derives_features_per_file() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "win", "game_1.pgn", WIN_PGN);
        write_fixture(dir.path(), "loss", "game_2.pgn", LOSS_PGN);

        let rows = collect_rows(dir.path(), "hero").unwrap();
        assert_eq!(rows.len(), 2);

        let loss = &rows[0];
        assert_eq!(loss.filename, "game_2.pgn");
        assert_eq!(loss.folder, "loss");
        assert_eq!(loss.color, ColorPlayed::Black);
        assert_eq!(loss.rating_diff, None);
        assert_eq!(loss.record.move_count, 4);
        assert_eq!(loss.loss_quality, Some(LossQuality::Quick));
        assert_eq!(loss.termination_type, Termination::Checkmate);

        let win = &rows[1];
        assert_eq!(win.filename, "game_1.pgn");
        assert_eq!(win.folder, "win");
        assert_eq!(win.color, ColorPlayed::White);
        assert_eq!(win.rating_diff, Some(120));
        assert_eq!(win.game_length, GameLength::Quick);
        assert_eq!(win.opening_name, "Sicilian: Najdorf");
        assert_eq!(win.loss_quality, None);
        assert_eq!(win.termination_type, Termination::Resignation);
    }

    #[test]
    fn test_empty_file_still_yields_a_row_with_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "draw", "game_0.pgn", "");

        let rows = collect_rows(dir.path(), "hero").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].color, ColorPlayed::Unknown);
        assert_eq!(
            rows[0].record.parse_error.as_deref(),
            Some("Empty PGN file")
        );
    }

    #[test]
    fn test_files_outside_outcome_folders_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "win", "game_1.pgn", WIN_PGN);
        fs::write(dir.path().join("stray.pgn"), WIN_PGN).unwrap();

        let rows = collect_rows(dir.path(), "hero").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_write_csv_emits_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "win", "game_1.pgn", WIN_PGN);

        let rows = collect_rows(dir.path(), "hero").unwrap();
        let output = dir.path().join("report.csv");
        write_csv(&rows, &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap().split(',').next().unwrap(),
            "Filename"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("game_1.pgn,win,White,120,2,Quick,"));
        assert_eq!(lines.next(), None);
    }
}
