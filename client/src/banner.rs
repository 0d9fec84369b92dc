//! Remembers which announcement banners the visitor has closed.

use std::{cell::RefCell, collections::{BTreeSet, HashMap}};

use base64::{Engine, engine::general_purpose::URL_SAFE};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;


pub const DISMISSED_BANNERS_KEY: &str = "grower-directory.dismissed-banners";

/// String key/value store such as the browser's `localStorage`.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}


/// Stored as base64 of the CBOR encoding, under [`DISMISSED_BANNERS_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissedBanners {
    ids: BTreeSet<String>,
}

impl DismissedBanners {
    /// Reads the stored set. A missing or unreadable value means nothing
    /// has been dismissed.
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        let Some(raw) = storage.get_item(DISMISSED_BANNERS_KEY) else {
            return Self::default();
        };
        match Self::decode(&raw) {
            Ok(banners) => banners,
            Err(err) => {
                tracing::warn!(%err, "discarding unreadable dismissed-banner list");
                Self::default()
            }
        }
    }

    pub fn is_dismissed(&self, banner_id: &str) -> bool {
        self.ids.contains(banner_id)
    }

    /// Marks `banner_id` dismissed and writes the set back.
    pub fn dismiss(&mut self, banner_id: &str, storage: &impl KeyValueStorage) -> Result<(), StorageError> {
        if !self.ids.insert(banner_id.to_string()) {
            return Ok(());
        }
        storage.set_item(DISMISSED_BANNERS_KEY, &self.encode()?);
        Ok(())
    }

    fn encode(&self) -> Result<String, StorageError> {
        let mut serialized = Vec::new();
        ciborium::into_writer(self, &mut serialized)?;
        Ok(URL_SAFE.encode(serialized))
    }

    fn decode(raw: &str) -> Result<Self, StorageError> {
        let bytes = URL_SAFE.decode(raw.as_bytes())?;
        Ok(ciborium::from_reader(std::io::Cursor::new(bytes))?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissal_survives_reload() {
        let storage = MemoryStorage::new();
        let mut banners = DismissedBanners::load(&storage);
        assert!(!banners.is_dismissed("spring-field-day"));
        banners.dismiss("spring-field-day", &storage).unwrap();

        let reloaded = DismissedBanners::load(&storage);
        assert!(reloaded.is_dismissed("spring-field-day"));
        assert!(!reloaded.is_dismissed("grant-deadline"));
    }

    #[test]
    fn garbage_in_storage_means_nothing_dismissed() {
        let storage = MemoryStorage::new();
        storage.set_item(DISMISSED_BANNERS_KEY, "!!not base64!!");
        assert_eq!(DismissedBanners::load(&storage), DismissedBanners::default());
        storage.set_item(DISMISSED_BANNERS_KEY, &URL_SAFE.encode(b"\xff\x00"));
        assert_eq!(DismissedBanners::load(&storage), DismissedBanners::default());
    }

    #[test]
    fn dismissing_twice_does_not_rewrite() {
        let storage = MemoryStorage::new();
        let mut banners = DismissedBanners::default();
        banners.dismiss("a", &storage).unwrap();
        storage.set_item(DISMISSED_BANNERS_KEY, "sentinel");
        banners.dismiss("a", &storage).unwrap();
        assert_eq!(storage.get_item(DISMISSED_BANNERS_KEY).as_deref(), Some("sentinel"));
    }
}
