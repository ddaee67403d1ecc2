//! High score leaderboard
//!
//! Persisted to LocalStorage, tracks the top 5 scores with arcade-style
//! initials.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Longest accepted initials
pub const MAX_NAME_LEN: usize = 5;

/// Arcade initials: 1 to 5 uppercase ASCII letters
pub fn valid_name(name: &str) -> bool {
    (1..=MAX_NAME_LEN).contains(&name.len())
        && name.bytes().all(|b| b.is_ascii_uppercase())
}

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player initials, validated on entry
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gallop_highscores";

    /// Create empty leaderboard
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

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard if it qualifies and the name is
    /// valid initials. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !valid_name(name) || !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry {
            name: name.to_owned(),
            score,
        };

        // Insertion point keeps the list sorted descending; ties go
        // below existing entries
        let pos = self.entries.iter().position(|e| score > e.score);
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

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<Leaderboard>(&json) {
                    log::info!("Loaded {} high scores", board.entries.len());
                    return board;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name_rules() {
        assert!(valid_name("A"));
        assert!(valid_name("KAREN"));
        assert!(!valid_name(""));
        assert!(!valid_name("TOOBIG"));
        assert!(!valid_name("abc"));
        assert!(!valid_name("AB1"));
        assert!(!valid_name("A B"));
        // Non-ASCII letters are rejected too
        assert!(!valid_name("ÀBC"));
    }

    #[test]
    fn test_scores_sorted_descending() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_score("AAA", 100), Some(1));
        assert_eq!(board.add_score("BBB", 300), Some(1));
        assert_eq!(board.add_score("CCC", 200), Some(2));
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
        assert_eq!(board.top_score(), Some(300));
    }

    #[test]
    fn test_capped_at_five_entries() {
        let mut board = Leaderboard::new();
        for score in [50, 40, 30, 20, 10] {
            board.add_score("AAA", score);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);

        // Below the board: rejected
        assert!(!board.qualifies(10));
        assert_eq!(board.add_score("ZZZ", 5), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);

        // Beats the lowest: inserted, lowest pushed off
        assert_eq!(board.add_score("YYY", 35), Some(3));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().unwrap().score, 20);
    }

    #[test]
    fn test_zero_and_invalid_names_never_enter() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_score("AAA", 0), None);
        assert_eq!(board.add_score("lower", 100), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_potential_rank_matches_insertion() {
        let mut board = Leaderboard::new();
        board.add_score("AAA", 300);
        board.add_score("BBB", 100);
        assert_eq!(board.potential_rank(200), Some(2));
        assert_eq!(board.add_score("CCC", 200), Some(2));
        assert_eq!(board.potential_rank(0), None);
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut board = Leaderboard::new();
        board.add_score("KAREN", 512);
        let json = serde_json::to_string(&board).unwrap();
        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries.len(), 1);
        assert_eq!(back.entries[0].name, "KAREN");
        assert_eq!(back.entries[0].score, 512);
    }
}
