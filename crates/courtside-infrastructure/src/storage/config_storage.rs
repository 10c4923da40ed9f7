//! TOML file storage with atomic writes.
//!
//! Concurrent `courtside` processes may touch the same config file; writes
//! go through an exclusive lock and a temp file that is renamed into place.

use courtside_core::{CourtsideError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// A typed TOML file.
///
/// Provides:
/// - **Atomicity**: saves write a sibling temp file, fsync it, then rename
/// - **Isolation**: `update` holds an exclusive `fs2` lock for the whole
///   read-modify-write cycle
///
/// Knows nothing about what the file contains; callers pick `T`.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a storage handle for `path`. Nothing is touched on disk.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and parses the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: file exists and parsed
    /// - `Ok(None)`: file is missing or blank
    /// - `Err`: read failure or invalid TOML
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Writes `value` atomically, creating parent directories as needed.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(value)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Read-modify-write under an exclusive lock.
    ///
    /// A missing file starts from `default`. The result of `f` is written
    /// back only if it returns `Ok`.
    pub fn update<T, F>(&self, default: T, f: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut value = self.load()?.unwrap_or(default);
        f(&mut value)?;
        self.save(&value)?;
        Ok(value)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CourtsideError::io("Config path has no file name"))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Exclusive lock on `<file>.lock`, released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| CourtsideError::io(format!("Failed to acquire config lock: {e}")))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("nested/sample.toml"));

        let sample = Sample {
            name: "courts".into(),
            count: 3,
        };
        storage.save(&sample).unwrap();

        let loaded: Sample = storage.load().unwrap().unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn test_load_missing_or_blank_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.toml");
        let storage = ConfigStorage::new(path.clone());
        assert!(storage.load::<Sample>().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(storage.load::<Sample>().unwrap().is_none());
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.toml");
        fs::write(&path, "name = [unterminated").unwrap();

        let err = ConfigStorage::new(path).load::<Sample>().unwrap_err();
        assert!(matches!(err, CourtsideError::Serialization { .. }));
    }

    #[test]
    fn test_update_starts_from_default_and_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("sample.toml"));

        storage
            .update(Sample::default(), |s| {
                s.count += 10;
                Ok(())
            })
            .unwrap();
        let updated = storage
            .update(Sample::default(), |s| {
                s.count += 5;
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.count, 15);
        assert!(!temp_dir.path().join("sample.lock").exists());
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("sample.toml"));
        storage
            .save(&Sample {
                name: "keep".into(),
                count: 1,
            })
            .unwrap();

        let result = storage.update(Sample::default(), |s| {
            s.count = 99;
            Err(CourtsideError::validation("nope"))
        });
        assert!(result.is_err());

        let loaded: Sample = storage.load().unwrap().unwrap();
        assert_eq!(loaded.count, 1);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.toml");
        ConfigStorage::new(path.clone())
            .save(&Sample::default())
            .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".sample.toml.tmp").exists());
    }
}
