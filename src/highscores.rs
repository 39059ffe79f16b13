//! Best-score persistence
//!
//! Only a single number survives between runs. Backends live behind
//! `HighScoreStore` so the session does not care whether it ends up in a
//! file, LocalStorage or nowhere at all.

#[cfg(not(target_arch = "wasm32"))]
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Key-value store holding the best score
pub trait HighScoreStore {
    /// Stored best score, 0 when nothing was saved yet
    fn high_score(&self) -> Result<u64, ServiceError>;

    fn set_high_score(&mut self, score: u64) -> Result<(), ServiceError>;
}

/// In-process store; forgets everything on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> Result<u64, ServiceError> {
        Ok(self.best)
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), ServiceError> {
        self.best = score;
        Ok(())
    }
}

/// On-disk record
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct ScoreRecord {
    high_score: u64,
}

/// JSON file next to the binary (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for JsonFileStore {
    fn high_score(&self) -> Result<u64, ServiceError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let record: ScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), ServiceError> {
        let json = serde_json::to_string_pretty(&ScoreRecord { high_score: score })?;
        std::fs::write(&self.path, json)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage under the `runnerHighScore` key (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "runnerHighScore";

    fn storage() -> Result<web_sys::Storage, ServiceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(ServiceError::Unavailable("LocalStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn high_score(&self) -> Result<u64, ServiceError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| ServiceError::Rejected(format!("{e:?}")))?;
        match raw {
            // Stored as a bare number
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ServiceError::Corrupt(format!("high score {value:?}"))),
            None => Ok(0),
        }
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), ServiceError> {
        let storage = Self::storage()?;
        storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|e| ServiceError::Rejected(format!("{e:?}")))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.high_score().unwrap(), 0);
        store.set_high_score(42).unwrap();
        assert_eq!(store.high_score().unwrap(), 42);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sky-runner-{}-{}.json", name, std::process::id()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_reads_as_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.high_score().unwrap(), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_persists() {
        let path = temp_path("persist");
        let mut store = JsonFileStore::new(&path);
        store.set_high_score(310).unwrap();
        assert_eq!(JsonFileStore::new(&path).high_score().unwrap(), 310);
        let _ = std::fs::remove_file(path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_garbage_file_is_corrupt() {
        let path = temp_path("garbage");
        std::fs::write(&path, "not json").unwrap();
        let err = JsonFileStore::new(&path).high_score().unwrap_err();
        assert!(matches!(err, ServiceError::Corrupt(_)));
        let _ = std::fs::remove_file(path);
    }
}
