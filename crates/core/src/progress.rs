//! Persisted campaign progress and the string store it is kept in.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::sim::clamp_stars;

/// Fixed store key the progress blob lives under.
pub const PROGRESS_KEY: &str = "maze_escape_progress";

/// Completed level ids in completion order plus the best star count per level.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    pub completed: Vec<u32>,
    pub stars: BTreeMap<u32, u8>,
}

impl ProgressRecord {
    /// Lenient decode: a field with the wrong shape falls back to empty on its own,
    /// and stored star counts are clamped. Only unparseable JSON is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut record = Self::default();

        if let Some(ids) = value.get("completed").and_then(Value::as_array) {
            for id in ids.iter().filter_map(Value::as_u64) {
                if let Ok(id) = u32::try_from(id) {
                    record.mark_completed(id);
                }
            }
        }

        if let Some(stars) = value.get("stars").and_then(Value::as_object) {
            for (id, count) in stars {
                let (Ok(id), Some(count)) = (id.parse::<u32>(), count.as_f64()) else {
                    continue;
                };
                record.stars.insert(id, clamp_stars(count as i64));
            }
        }

        Ok(record)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Records a clear. The best star count never decreases.
    pub fn complete_level(&mut self, level_id: u32, raw_stars: i64) {
        self.mark_completed(level_id);
        let stars = clamp_stars(raw_stars);
        let best = self.stars.entry(level_id).or_insert(0);
        *best = (*best).max(stars);
    }

    pub fn stars(&self, level_id: u32) -> u8 {
        self.stars.get(&level_id).map_or(0, |&stars| clamp_stars(i64::from(stars)))
    }

    pub fn is_completed(&self, level_id: u32) -> bool {
        self.completed.contains(&level_id)
    }

    fn mark_completed(&mut self, level_id: u32) {
        if !self.completed.contains(&level_id) {
            self.completed.push(level_id);
        }
    }
}

/// String key-value persistence, the shape of a browser-style local store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Never fails: a missing, unreadable or corrupt blob yields an empty record.
pub fn load_progress(store: &impl KeyValueStore) -> ProgressRecord {
    let raw = match store.get(PROGRESS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ProgressRecord::default(),
        Err(err) => {
            warn!("could not read saved progress, starting fresh: {err}");
            return ProgressRecord::default();
        }
    };
    ProgressRecord::from_json(&raw).unwrap_or_else(|err| {
        warn!("saved progress is corrupt, starting fresh: {err}");
        ProgressRecord::default()
    })
}

pub fn save_progress(
    store: &mut impl KeyValueStore,
    record: &ProgressRecord,
) -> Result<(), StoreError> {
    let json = record.to_json()?;
    store.set(PROGRESS_KEY, &json)
}
