//! File-backed persistence for configuration records.
//!
//! Each manifest-driven module keeps its configurations in a TOML state
//! file. The file is created on the first mutation; once it exists it wins
//! over the seeds shipped in the manifest, so created, edited and removed
//! configurations survive process restarts.

use crate::error::RuntimeResult;
use chrono::{DateTime, Utc};
use plugforge_core::{Info, UniqueId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One persisted configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub info: Info,

    /// Plugin-interpreted argument vector, e.g. a symbol list.
    #[serde(default)]
    pub args: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConfigRecord {
    pub fn new(info: Info, args: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            info,
            args,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> UniqueId {
        self.info.id()
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    configurations: Vec<ConfigRecord>,
}

/// A module's configuration records, in enumeration order, mirrored to a
/// TOML state file on every mutation.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    records: Vec<ConfigRecord>,
}

impl ConfigStore {
    /// Open the store at `path`, falling back to `seeds` when no state
    /// file exists yet.
    pub fn open(path: PathBuf, seeds: Vec<ConfigRecord>) -> RuntimeResult<Self> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let state: StateFile = toml::from_str(&content)?;
            state.configurations
        } else {
            seeds
        };

        Ok(Self { path, records })
    }

    pub fn records(&self) -> &[ConfigRecord] {
        &self.records
    }

    /// Identities of all records, in enumeration order.
    pub fn infos(&self) -> Vec<Info> {
        self.records.iter().map(|r| r.info.clone()).collect()
    }

    pub fn get(&self, id: &UniqueId) -> Option<&ConfigRecord> {
        self.records.iter().find(|r| r.id() == *id)
    }

    pub fn contains(&self, id: &UniqueId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and write the state file.
    pub fn insert(&mut self, record: ConfigRecord) -> RuntimeResult<()> {
        self.records.push(record);
        self.save()
    }

    /// Stamp a record as updated, write the state file, and return a
    /// snapshot of it. `None` when the id is unknown.
    pub fn touch(&mut self, id: &UniqueId) -> RuntimeResult<Option<ConfigRecord>> {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == *id) else {
            return Ok(None);
        };

        record.updated_at = Utc::now();
        let snapshot = record.clone();
        self.save()?;
        Ok(Some(snapshot))
    }

    /// Drop a record and write the state file. Returns whether the id was
    /// present.
    pub fn remove(&mut self, id: &UniqueId) -> RuntimeResult<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id() != *id);

        if self.records.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> RuntimeResult<()> {
        let state = StateFile {
            configurations: self.records.clone(),
        };
        let content = toml::to_string_pretty(&state)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
