//! URL Directory
//!
//! Short code → entry map. All mutations take the write lock for their full
//! duration, so concurrent requests never interleave a create/update/delete.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::errors::{Result, TinyAppError};
use crate::storage::models::UrlEntry;
use crate::utils::{MAX_DRAW_ATTEMPTS, generate_random_code};

pub struct UrlDirectory {
    entries: RwLock<HashMap<String, UrlEntry>>,
    code_length: usize,
}

impl UrlDirectory {
    pub fn new(code_length: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            code_length: code_length.max(1),
        }
    }

    /// Store `target_url` under a new short code and return the entry.
    ///
    /// Codes are redrawn while they collide with an existing key, so an
    /// existing entry is never overwritten. After `MAX_DRAW_ATTEMPTS`
    /// collisions the create fails with a storage error.
    pub fn create(&self, target_url: &str, owner_id: Option<&str>) -> Result<UrlEntry> {
        let mut entries = self.entries.write();
        for _ in 0..MAX_DRAW_ATTEMPTS {
            let code = generate_random_code(self.code_length);
            match entries.entry(code) {
                Entry::Occupied(occupied) => {
                    debug!("UrlDirectory: code '{}' collided, redrawing", occupied.key());
                }
                Entry::Vacant(vacant) => {
                    let entry = UrlEntry {
                        short_code: vacant.key().clone(),
                        target_url: target_url.to_string(),
                        owner_id: owner_id.map(str::to_string),
                        created_at: Utc::now(),
                    };
                    vacant.insert(entry.clone());
                    info!(
                        "UrlDirectory: created '{}' -> '{}'",
                        entry.short_code, entry.target_url
                    );
                    return Ok(entry);
                }
            }
        }

        warn!(
            "UrlDirectory: no free {}-char code after {} draws ({} entries)",
            self.code_length,
            MAX_DRAW_ATTEMPTS,
            entries.len()
        );
        Err(TinyAppError::storage(format!(
            "No free short code after {} attempts",
            MAX_DRAW_ATTEMPTS
        )))
    }

    /// Insert an entry with a fixed code (seed data). Existing codes are kept.
    pub fn insert(&self, entry: UrlEntry) -> Result<()> {
        match self.entries.write().entry(entry.short_code.clone()) {
            Entry::Occupied(_) => Err(TinyAppError::validation(format!(
                "Short code '{}' already exists",
                entry.short_code
            ))),
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, short_code: &str) -> Option<UrlEntry> {
        self.entries.read().get(short_code).cloned()
    }

    /// Point an existing code at a new target. The owner never changes.
    pub fn update(&self, short_code: &str, new_target_url: &str) -> Result<UrlEntry> {
        let mut entries = self.entries.write();
        let entry = entries.get_mut(short_code).ok_or_else(|| {
            TinyAppError::not_found(format!("Short URL '{}' does not exist", short_code))
        })?;

        entry.target_url = new_target_url.to_string();
        info!("UrlDirectory: updated '{}' -> '{}'", short_code, new_target_url);
        Ok(entry.clone())
    }

    /// Remove a code. Deleting a missing code is a no-op that returns `None`.
    pub fn delete(&self, short_code: &str) -> Option<UrlEntry> {
        let removed = self.entries.write().remove(short_code);
        if removed.is_some() {
            info!("UrlDirectory: deleted '{}'", short_code);
        }
        removed
    }

    /// Copy of every entry, for filtering outside the lock.
    pub fn snapshot(&self) -> Vec<UrlEntry> {
        self.entries.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
