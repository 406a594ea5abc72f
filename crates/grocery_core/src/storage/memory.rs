use super::{KeyValueStore, KvError, KvResult};
use std::collections::HashMap;

/// Process-local key-value store. Contents are lost on drop.
///
/// An optional byte quota caps the total size of keys plus values, the way
/// browser-local storage does; writes that would exceed it are rejected and
/// leave the previous value in place.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries,
            quota_bytes: None,
        }
    }

    /// Limits the total stored bytes (keys plus values).
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(KvError::Rejected(format!(
                    "quota of {quota} bytes exceeded ({needed} bytes needed)"
                )));
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
