//! Score persistence. One `name,score` line per finished game.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// How many entries the end screen lists.
pub const TOP_SCORES: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: f64,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        ScoreEntry { name: name.into(), score }
    }

    pub fn to_line(&self) -> String {
        format!("{},{:.2}", self.name, self.score)
    }

    /// The score is whatever follows the last comma.
    pub fn parse_line(line: &str) -> Option<ScoreEntry> {
        let (name, score) = line.trim().rsplit_once(',')?;
        Some(ScoreEntry::new(name, score.trim().parse().ok()?))
    }

    /// End-screen rendering.
    pub fn label(&self) -> String {
        format!("{} - {:.2}", self.name, self.score)
    }
}

pub trait ScoreStore {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), LoadError>;
    fn load(&self) -> Result<Vec<ScoreEntry>, LoadError>;
}

/// Highest `n` entries, descending. Equal scores keep their recorded order.
pub fn top_scores(mut entries: Vec<ScoreEntry>, n: usize) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(n);
    entries
}

// ── File store ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> LoadError {
        LoadError::Io { path: self.path.clone(), source }
    }
}

impl ScoreStore for ScoreFile {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), LoadError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", entry.to_line()).map_err(|e| self.io_error(e))
    }

    /// A missing file is an empty list. Unreadable lines are skipped.
    fn load(&self) -> Result<Vec<ScoreEntry>, LoadError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(text.lines().filter_map(ScoreEntry::parse_line).collect())
    }
}

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct MemoryScores {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreStore for MemoryScores {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), LoadError> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn load(&self) -> Result<Vec<ScoreEntry>, LoadError> {
        Ok(self.entries.clone())
    }
}
