//! Persisted key-value store.
//!
//! Four named text slots hold everything that survives a restart. Values are
//! plain text (JSON for the profile and logs) so data written by earlier
//! versions of the app stays readable.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, VitalisError};

/// The fixed slot names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    SessionActive,
    PatientProfile,
    DailyLogs,
    Theme,
}

impl StoreKey {
    /// Keys wiped when persisted session data is found corrupt.
    pub const SESSION_KEYS: [StoreKey; 3] = [
        StoreKey::PatientProfile,
        StoreKey::DailyLogs,
        StoreKey::SessionActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::SessionActive => "healthAppSessionActive",
            StoreKey::PatientProfile => "healthAppPatientProfile",
            StoreKey::DailyLogs => "healthAppDailyLogs",
            StoreKey::Theme => "healthAppTheme",
        }
    }
}

/// Synchronous text key-value storage.
///
/// No transactional guarantee spans multiple keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StoreKey) -> Result<Option<String>>;

    fn set(&self, key: StoreKey, value: &str) -> Result<()>;

    fn remove(&self, key: StoreKey) -> Result<()>;
}

/// Process-local store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<&'static str, String>>> {
        self.entries
            .lock()
            .map_err(|e| VitalisError::internal(format!("memory store lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.lock()?.get(key.as_str()).cloned())
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        self.lock()?.insert(key.as_str(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        self.lock()?.remove(key.as_str());
        Ok(())
    }
}
