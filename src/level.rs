//! Level files
//!
//! A level is a small text file:
//!
//! ```text
//! Title of the level
//! 120
//! rrrrrrrrr
//! gg.www.gg
//! ```
//!
//! Line 1 is the title, line 2 the time limit in seconds, and up to
//! `BLOCK_ROWS_MAX` further lines hold one block character per column.
//! Levels form a sequence by file name: `level01.data` is followed by
//! `level02.data`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, bail};

use crate::consts::*;
use crate::sim::block::EMPTY_CELL;

/// Parsed level data
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub title: String,
    /// Seconds; display only
    pub time_limit: u32,
    /// Exactly `BLOCK_COLS_MAX` characters per row
    pub rows: Vec<String>,
}

impl Level {
    /// Parse level text
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut lines = text.lines();

        let Some(title) = lines.next() else {
            bail!("Level is empty");
        };
        let Some(time_line) = lines.next() else {
            bail!("Level is missing its time limit line");
        };
        let time_limit = time_line
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid time limit {:?}", time_line.trim()))?;

        let rows = lines
            .take(BLOCK_ROWS_MAX)
            .map(|line| {
                let mut row: String = line
                    .trim_end_matches('\r')
                    .chars()
                    .take(BLOCK_COLS_MAX)
                    .collect();
                let len = row.chars().count();
                row.extend(std::iter::repeat_n(EMPTY_CELL, BLOCK_COLS_MAX - len));
                row
            })
            .collect();

        Ok(Self {
            title: title.trim_end().to_string(),
            time_limit,
            rows,
        })
    }

    /// Block character at a cell; `.` outside the grid
    pub fn block_at(&self, row: usize, col: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.chars().nth(col))
            .unwrap_or(EMPTY_CELL)
    }
}

/// Where level files come from
pub trait LevelSource {
    fn load(&self, path: &str) -> anyhow::Result<Level>;
    fn exists(&self, path: &str) -> bool;
}

/// Levels read from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLevelSource;

impl LevelSource for FsLevelSource {
    fn load(&self, path: &str) -> anyhow::Result<Level> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read level file {path}"))?;
        Level::parse(&text).with_context(|| format!("Malformed level file {path}"))
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }
}

/// Levels held in memory, keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelSource {
    levels: HashMap<String, String>,
}

impl MemoryLevelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level's raw text under `path`
    pub fn with_level(mut self, path: &str, text: &str) -> Self {
        self.levels.insert(path.to_string(), text.to_string());
        self
    }
}

impl LevelSource for MemoryLevelSource {
    fn load(&self, path: &str) -> anyhow::Result<Level> {
        let text = self
            .levels
            .get(path)
            .with_context(|| format!("No level at {path}"))?;
        Level::parse(text).with_context(|| format!("Malformed level {path}"))
    }

    fn exists(&self, path: &str) -> bool {
        self.levels.contains_key(path)
    }
}

/// Byte range of the last run of ASCII digits in `path`
fn last_digit_run(path: &str) -> Option<(usize, usize)> {
    let bytes = path.as_bytes();
    let end = bytes.iter().rposition(u8::is_ascii_digit)? + 1;
    let start = bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1);
    Some((start, end))
}

/// File name of the following level: the last digit run incremented,
/// keeping its zero padding. `None` if the name has no digits.
pub fn next_level_path(path: &str) -> Option<String> {
    let (start, end) = last_digit_run(path)?;
    let digits = &path[start..end];
    let next = digits.parse::<u64>().ok()?.checked_add(1)?;
    let width = digits.len();
    Some(format!("{}{next:0width$}{}", &path[..start], &path[end..]))
}

/// Level number shown on the HUD (0 if the name has no digits)
pub fn level_number(path: &str) -> u32 {
    last_digit_run(path)
        .and_then(|(start, end)| path[start..end].parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_and_truncates_rows() {
        let level = Level::parse("Opening Shot\n120\nrrrrrrrrrrrr\nw.w\n").expect("parse");
        assert_eq!(level.title, "Opening Shot");
        assert_eq!(level.time_limit, 120);
        assert_eq!(level.rows, vec!["rrrrrrrrr", "w.w......"]);
        assert_eq!(level.block_at(1, 2), 'w');
        assert_eq!(level.block_at(1, 8), '.');
        assert_eq!(level.block_at(40, 0), '.');
    }

    #[test]
    fn test_parse_limits_row_count() {
        let mut text = String::from("Tall\n60\n");
        for _ in 0..20 {
            text.push_str("r\n");
        }
        let level = Level::parse(&text).expect("parse");
        assert_eq!(level.rows.len(), BLOCK_ROWS_MAX);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let level = Level::parse("Dos\r\n30\r\nrg\r\n").expect("parse");
        assert_eq!(level.title, "Dos");
        assert_eq!(level.rows[0], "rg.......");
    }

    #[test]
    fn test_parse_rejects_missing_header() {
        assert!(Level::parse("").is_err());
        assert!(Level::parse("Title only\n").is_err());
        assert!(Level::parse("Title\nsoon\nrrr\n").is_err());
    }

    #[test]
    fn test_next_level_path_keeps_padding() {
        assert_eq!(
            next_level_path("resource/levels/level01.data").as_deref(),
            Some("resource/levels/level02.data")
        );
        assert_eq!(
            next_level_path("resource/levels/level09.data").as_deref(),
            Some("resource/levels/level10.data")
        );
        assert_eq!(next_level_path("lvl7").as_deref(), Some("lvl8"));
        assert_eq!(next_level_path("stage99.txt").as_deref(), Some("stage100.txt"));
    }

    #[test]
    fn test_next_level_path_uses_last_digit_run() {
        assert_eq!(
            next_level_path("pack2/level003.data").as_deref(),
            Some("pack2/level004.data")
        );
    }

    #[test]
    fn test_next_level_path_without_digits() {
        assert_eq!(next_level_path("resource/levels/final.data"), None);
    }

    #[test]
    fn test_level_number() {
        assert_eq!(level_number("resource/levels/level01.data"), 1);
        assert_eq!(level_number("resource/levels/level12.data"), 12);
        assert_eq!(level_number("bonus.data"), 0);
    }

    #[test]
    fn test_memory_source() {
        let source = MemoryLevelSource::new().with_level("a01", "A\n10\nr\n");
        assert!(source.exists("a01"));
        assert!(!source.exists("a02"));
        assert_eq!(source.load("a01").expect("load").title, "A");
        assert!(source.load("a02").is_err());
    }
}
