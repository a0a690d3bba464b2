//! High score persistence
//!
//! Features:
//! - Single integer high score
//! - Missing or corrupt storage reads as 0, never an error
//! - Atomic file replacement (tmp → save) so an interrupted write keeps the
//!   previous value

pub mod file;

pub use file::FileHighScoreStore;

/// Storage service for the session high score
pub trait HighScoreStore {
    /// Stored high score, or 0 if there is none or it cannot be read
    fn load_high_score(&mut self) -> u64;

    fn save_high_score(&mut self, score: u64) -> std::io::Result<()>;
}

/// In-memory store, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<u64> {
        self.value
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&mut self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u64) -> std::io::Result<()> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}
