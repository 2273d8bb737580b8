//! Cursor over the level catalog, paired with persisted progress.

use log::{info, warn};

use crate::content::{CAMPAIGN, LevelDescriptor};
use crate::error::MazeError;
use crate::progress::{KeyValueStore, ProgressRecord, load_progress, save_progress};

pub struct Campaign<S: KeyValueStore> {
    levels: &'static [LevelDescriptor],
    current: usize,
    progress: ProgressRecord,
    store: S,
}

impl<S: KeyValueStore> Campaign<S> {
    /// Starts at the first level with whatever progress the store holds.
    pub fn load(store: S) -> Self {
        Self::from_parts(&CAMPAIGN, store)
    }

    /// A custom catalog. The cursor always points at a level, so it cannot be empty.
    pub fn with_levels(levels: &'static [LevelDescriptor], store: S) -> Result<Self, MazeError> {
        if levels.is_empty() {
            return Err(MazeError::EmptyCampaign);
        }
        Ok(Self::from_parts(levels, store))
    }

    fn from_parts(levels: &'static [LevelDescriptor], store: S) -> Self {
        let progress = load_progress(&store);
        info!(
            "loaded progress: {} of {} levels completed",
            progress.completed.len(),
            levels.len()
        );
        Self { levels, current: 0, progress, store }
    }

    pub fn levels(&self) -> &'static [LevelDescriptor] {
        self.levels
    }

    pub fn current_level(&self) -> &'static LevelDescriptor {
        &self.levels[self.current]
    }

    /// Advances the cursor. Returns `false` at the last level, leaving it in place.
    pub fn next_level(&mut self) -> bool {
        if self.current + 1 < self.levels.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor to `level_id`. Unknown ids leave the cursor untouched.
    pub fn set_level(&mut self, level_id: u32) -> bool {
        match self.levels.iter().position(|level| level.id == level_id) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Records a clear of the current level and persists progress.
    pub fn complete_level(&mut self, raw_stars: i64) {
        let level_id = self.current_level().id;
        self.progress.complete_level(level_id, raw_stars);
        self.persist();
    }

    pub fn stars(&self, level_id: u32) -> u8 {
        self.progress.stars(level_id)
    }

    pub fn is_completed(&self, level_id: u32) -> bool {
        self.progress.is_completed(level_id)
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    pub fn reset_progress(&mut self) {
        self.progress = ProgressRecord::default();
        self.persist();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write failures keep the in-memory record.
    fn persist(&mut self) {
        if let Err(err) = save_progress(&mut self.store, &self.progress) {
            warn!("could not save progress: {err}");
        }
    }
}
