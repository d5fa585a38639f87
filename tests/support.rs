// tests/support.rs
//! Test utilities: records, stores and on-disk fixtures

use std::path::{Path, PathBuf};

use hash_master::{
    Algorithm, CharRestriction, HashMaster, MemoryPersistence, ParameterRecord, Persistence,
    SettingsMap, SettingsStore,
};
use tempfile::TempDir;

/// Record with the common defaults and the given iterations
#[allow(dead_code)]
pub fn record(description: &str, iterations: &str) -> ParameterRecord {
    ParameterRecord::new(
        description,
        Algorithm::Sha256,
        CharRestriction::AlnumUnderscore,
        "12",
        iterations,
    )
}

#[allow(dead_code)]
pub fn map_of(records: &[ParameterRecord]) -> SettingsMap {
    records
        .iter()
        .map(|r| (r.description.clone(), r.clone()))
        .collect()
}

/// Store seeded with `records`, plus a handle on what it persists
#[allow(dead_code)]
pub fn memory_store(records: &[ParameterRecord]) -> (SettingsStore, MemoryPersistence) {
    let persistence = if records.is_empty() {
        MemoryPersistence::new()
    } else {
        MemoryPersistence::with_contents(serde_json::to_vec(&map_of(records)).unwrap())
    };
    let store = SettingsStore::open(persistence.clone());
    (store, persistence)
}

/// Persistence holding a fixed blob that rejects every write
#[allow(dead_code)]
pub struct FailingWrites(pub Vec<u8>);

impl Persistence for FailingWrites {
    fn read_all(&self) -> hash_master::CoreResult<Option<Vec<u8>>> {
        Ok(Some(self.0.clone()))
    }

    fn write_all(&mut self, _bytes: &[u8]) -> hash_master::CoreResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

/// Store over `records` whose writes always fail
#[allow(dead_code)]
pub fn unwritable_store(records: &[ParameterRecord]) -> SettingsStore {
    let bytes = serde_json::to_vec(&map_of(records)).unwrap();
    SettingsStore::open(FailingWrites(bytes))
}

/// App backed by files in a fresh temp directory
#[allow(dead_code)]
pub struct TestApp {
    pub app: HashMaster,
    dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let app = Self::open_in(dir.path());
        Self { app, dir }
    }

    fn open_in(dir: &Path) -> HashMaster {
        HashMaster::with_persistence(
            hash_master::FilePersistence::new(dir.join("settings.json")),
            hash_master::FilePersistence::new(dir.join("preferences.json")),
        )
    }

    /// Re-open from disk, as a fresh process would
    pub fn reopen(&mut self) {
        self.app = Self::open_in(self.dir.path());
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn settings_bytes(&self) -> Vec<u8> {
        std::fs::read(self.file("settings.json")).unwrap_or_default()
    }
}
