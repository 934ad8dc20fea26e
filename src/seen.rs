use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Alert keys already posted today, backed by a flat JSON array on disk.
#[derive(Debug, Clone)]
pub struct SeenKeySet {
    path: PathBuf,
    keys: HashSet<String>,
}

impl SeenKeySet {
    /// Loads the file and keeps only keys that start with `date`.
    /// A missing file is an empty set; an unreadable one is logged and treated the same.
    pub fn load(path: impl Into<PathBuf>, date: &str) -> Self {
        let path = path.into();
        let stored = match read_keys(&path) {
            Ok(keys) => keys,
            Err(e) => {
                warn!("⚠️  Ignoring unreadable seen-keys file {}: {:#}", path.display(), e);
                Vec::new()
            }
        };

        let total = stored.len();
        let keys: HashSet<String> = stored.into_iter().filter(|k| k.starts_with(date)).collect();
        debug!("Loaded {} seen keys for {} ({} pruned)", keys.len(), date, total - keys.len());

        Self { path, keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns `true` if the key was not present before.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file with the current keys, sorted.
    pub fn save(&self) -> Result<()> {
        let sorted: BTreeSet<&String> = self.keys.iter().collect();
        let json = serde_json::to_string(&sorted)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

fn read_keys(path: &Path) -> Result<Vec<String>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    serde_json::from_str(&text).context("seen-keys file is not a JSON array of strings")
}
