//! Local persistence for the measurement history and goal table.
//!
//! The whole `AppState` is stored as one JSON document under [`STORAGE_KEY`]:
//! in `localStorage` on the web and as a file in the platform data directory
//! on desktop. Reads never fail from the caller's point of view; a missing or
//! unreadable payload yields the seed state.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use super::model::AppState;
use super::seed;

pub const STORAGE_KEY: &str = "body_metrics_pro_data";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored payload could not be (de)serialised: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key/value slot store. Implemented by the platform backends and
/// by an in-memory store for tests.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}

/// Load the persisted state from the platform backend, falling back to the
/// seed state.
pub fn load() -> AppState {
    match platform_backend() {
        Ok(backend) => load_from(&backend),
        Err(err) => {
            warn!(error = %err, "storage unavailable; starting from seed data");
            seed::seed_state()
        }
    }
}

/// Persist the full state, overwriting whatever was stored before.
pub fn save(state: &AppState) -> Result<(), StorageError> {
    save_to(&platform_backend()?, state)
}

pub fn load_from<B: StorageBackend + ?Sized>(backend: &B) -> AppState {
    match backend.read(STORAGE_KEY) {
        Ok(Some(raw)) => match decode_state(&raw) {
            Ok(state) => {
                debug!(entries = state.entries.len(), "loaded persisted state");
                state
            }
            Err(err) => {
                warn!(error = %err, "persisted state is malformed; using seed data");
                seed::seed_state()
            }
        },
        Ok(None) => {
            debug!("no persisted state; using seed data");
            seed::seed_state()
        }
        Err(err) => {
            warn!(error = %err, "failed reading persisted state; using seed data");
            seed::seed_state()
        }
    }
}

pub fn save_to<B: StorageBackend + ?Sized>(backend: &B, state: &AppState) -> Result<(), StorageError> {
    let payload = encode_state(state)?;
    backend.write(STORAGE_KEY, &payload)?;
    debug!(bytes = payload.len(), "persisted state");
    Ok(())
}

pub fn encode_state(state: &AppState) -> Result<String, StorageError> {
    Ok(serde_json::to_string(state)?)
}

pub fn decode_state(raw: &str) -> Result<AppState, StorageError> {
    let state: AppState = serde_json::from_str(raw)?;
    Ok(state.normalized())
}

/// Volatile backend used by tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(key: &str, payload: &str) -> Self {
        let storage = Self::new();
        storage
            .slots
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        storage
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
pub fn platform_backend() -> Result<LocalStorage, StorageError> {
    LocalStorage::open()
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{StorageBackend, StorageError};

    /// `window.localStorage`.
    pub struct LocalStorage {
        inner: web_sys::Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, StorageError> {
            let window = web_sys::window()
                .ok_or_else(|| StorageError::Unavailable("window unavailable".into()))?;
            let inner = window
                .local_storage()
                .map_err(|_| StorageError::Unavailable("localStorage access denied".into()))?
                .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))?;
            Ok(Self { inner })
        }
    }

    impl StorageBackend for LocalStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner
                .get_item(key)
                .map_err(|_| StorageError::Unavailable("localStorage read failed".into()))
        }

        fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
            self.inner
                .set_item(key, payload)
                .map_err(|_| StorageError::Unavailable("localStorage write failed (quota?)".into()))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_backend() -> Result<FileStorage, StorageError> {
    FileStorage::in_data_dir()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{StorageBackend, StorageError};

    /// One JSON file per key inside a directory.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn in_data_dir() -> Result<Self, StorageError> {
            let dirs = directories::ProjectDirs::from("com", "Bodymetrics", "Bodymetrics")
                .ok_or_else(|| StorageError::Unavailable("no home directory".into()))?;
            Ok(Self::new(dirs.data_dir()))
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{key}.json"))
        }
    }

    impl StorageBackend for FileStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(raw) => Ok(Some(raw)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }

        fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
            fs::create_dir_all(&self.dir)?;
            let target = self.path_for(key);
            let staging = target.with_extension("json.tmp");
            fs::write(&staging, payload)?;
            fs::rename(&staging, &target)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{BodyPart, DEFAULT_PARTS};
    use crate::core::seed::seed_state_for;
    use time::macros::date;

    fn sample_state() -> AppState {
        seed_state_for(date!(2025 - 06 - 15))
    }

    #[test]
    fn save_then_load_reproduces_state() {
        let backend = MemoryStorage::new();
        let state = sample_state();

        save_to(&backend, &state).unwrap();
        assert_eq!(load_from(&backend), state);
    }

    #[test]
    fn missing_payload_yields_seed() {
        let backend = MemoryStorage::new();
        let state = load_from(&backend);
        assert_eq!(state.entries.len(), 13);
        assert_eq!(state.goals.len(), DEFAULT_PARTS.len());
    }

    #[test]
    fn corrupted_payload_yields_consistent_seed() {
        let backend = MemoryStorage::with_payload(STORAGE_KEY, "{\"entries\": [oops");
        let state = load_from(&backend);
        assert!(!state.entries.is_empty());
        for part in DEFAULT_PARTS {
            assert_eq!(state.goals.iter().filter(|g| g.part == part).count(), 1);
        }
    }

    #[test]
    fn wrong_shape_is_treated_as_corrupt() {
        let backend = MemoryStorage::with_payload(STORAGE_KEY, "[1, 2, 3]");
        assert_eq!(load_from(&backend).entries.len(), 13);
    }

    #[test]
    fn save_overwrites_previous_payload() {
        let backend = MemoryStorage::new();
        let mut state = sample_state();
        save_to(&backend, &state).unwrap();

        state.entries.truncate(2);
        state.goals[0].target = 1.0;
        save_to(&backend, &state).unwrap();

        let loaded = load_from(&backend);
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded, state);
    }

    #[test]
    fn decode_accepts_hand_written_payload() {
        let raw = r#"{
            "entries": [
                {"id": "b", "date": "2025-01-09", "values": {"Waist": 33.5}},
                {"id": "a", "date": "2025-01-02", "values": {"Waist": 34, "Body Fat %": 18.2}}
            ],
            "goals": [
                {"part": "Waist", "target": 32},
                {"part": "Waist", "target": 20}
            ]
        }"#;
        let state = decode_state(raw).unwrap();
        assert_eq!(state.entries[0].id, "a");
        assert_eq!(state.entries[0].value(BodyPart::BodyFat), Some(18.2));
        assert_eq!(state.goals.len(), 1);
        assert_eq!(state.goal_for(BodyPart::Waist), 32.0);
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStorage::new(dir.path().join("nested"));
        assert!(backend.read(STORAGE_KEY).unwrap().is_none());

        let state = sample_state();
        save_to(&backend, &state).unwrap();
        assert!(backend.dir().join("body_metrics_pro_data.json").exists());
        assert_eq!(load_from(&backend), state);
    }
}
