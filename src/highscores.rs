//! High score leaderboard
//!
//! Top 10 runs of the current session. Serializes to JSON for display; the
//! board lives only as long as the game instance that owns it.

use serde::{Deserialize, Serialize};

use crate::sim::{GameOverCause, GameState};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Distance travelled before the run ended
    pub distance: f64,
    pub cause: GameOverCause,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Leaderboard sorted by descending score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add an entry if it qualifies; returns the rank achieved (1-indexed)
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished run; `None` if the run is still going or did not qualify
    pub fn record_run(&mut self, state: &GameState, timestamp: f64) -> Option<usize> {
        let cause = state.runner.game_over?;
        let rank = self.add(HighScoreEntry {
            score: state.score(),
            distance: state.runner.distance,
            cause,
            timestamp,
        });
        if let Some(rank) = rank {
            log::info!("New high score #{}: {}", rank, state.score());
        }
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
