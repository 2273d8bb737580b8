use directories::ProjectDirs;
use maze_core::{KeyValueStore, StoreError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key-value store backed by one JSON file per key inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn get_default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "MazeEscape").map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes through a sibling temp file and a rename so a crash never leaves half a blob.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::ProgressRecord;
    use maze_core::progress::{PROGRESS_KEY, load_progress, save_progress};
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(PROGRESS_KEY).unwrap(), None);
    }

    #[test]
    fn test_atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        let mut record = ProgressRecord::default();
        record.complete_level(2, 3);
        save_progress(&mut store, &record).unwrap();

        let path = store.path_for(PROGRESS_KEY);
        assert!(path.exists());
        assert_eq!(load_progress(&store), record);

        // Verify tmp file is gone
        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn corrupt_file_loads_as_empty_progress() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path_for(PROGRESS_KEY), "{\"completed\": [1, 2").unwrap();
        assert_eq!(load_progress(&store), ProgressRecord::default());
    }

    #[test]
    fn unreadable_path_is_an_error_not_absent() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::create_dir_all(store.path_for(PROGRESS_KEY)).unwrap();
        assert!(store.get(PROGRESS_KEY).is_err());
    }
}
