//! File-backed key-value store.
//!
//! All slots live in one JSON object of string values, e.g.
//! `{"healthAppSessionActive": "true", "healthAppTheme": "dark"}`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};
use vitalis_core::error::{Result, VitalisError};
use vitalis_core::store::{KeyValueStore, StoreKey};

use super::atomic_file::{AtomicFile, FileFormat};

type Slots = BTreeMap<String, String>;

pub struct FileStore {
    file: AtomicFile<Slots>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path, FileFormat::Json),
        }
    }

    fn read_slots(&self) -> Result<Slots> {
        self.file
            .load()
            .map(Option::unwrap_or_default)
            .map_err(|e| match e {
                VitalisError::Serialization { message, .. } => VitalisError::corruption(format!(
                    "{} is not a JSON object of strings: {message}",
                    self.file.path().display()
                )),
                other => other,
            })
    }

    // Writers start over from an empty object when the file is unreadable, so
    // wiping session keys can always succeed.
    fn mutate(&self, f: impl FnOnce(&mut Slots)) -> Result<()> {
        self.file.update_with(
            |_| match self.read_slots() {
                Ok(slots) => Ok(slots),
                Err(err) if err.is_corruption() => {
                    warn!(error = %err, "discarding unreadable store file");
                    Ok(Slots::new())
                }
                Err(err) => Err(err),
            },
            |slots| {
                f(slots);
                Ok(())
            },
        )
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.read_slots()?.remove(key.as_str()))
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        debug!(key = key.as_str(), "store set");
        self.mutate(|slots| {
            slots.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        debug!(key = key.as_str(), "store remove");
        self.mutate(|slots| {
            slots.remove(key.as_str());
        })
    }
}
