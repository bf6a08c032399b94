//! Schedule persistence and the shared in-memory snapshot.
//!
//! Stores speak the key-value contract (`imsak`, `gunes`, `ogle`, `ikindi`, `aksam`, `yatsi`)
//! and always write all six keys together. [`SharedSchedule`] is what ticks read from: it is
//! replaced as a whole, so a reader sees either the old day or the new one, never a mix.

use crate::error::Result;
use crate::schedule::RawSchedule;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Key-value persistence for the raw schedule.
pub trait ScheduleStore: Send + Sync {
    /// Read the stored schedule; absent keys come back as defaults.
    fn load(&self) -> Result<RawSchedule>;

    /// Persist all six entries at once.
    fn save(&self, schedule: &RawSchedule) -> Result<()>;
}

/// Process-local store, used by tests and when no file is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<RawSchedule>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(schedule: RawSchedule) -> Self {
        Self {
            inner: Mutex::new(Some(schedule)),
        }
    }
}

impl ScheduleStore for MemoryStore {
    fn load(&self) -> Result<RawSchedule> {
        Ok(self.inner.lock().clone().unwrap_or_default())
    }

    fn save(&self, schedule: &RawSchedule) -> Result<()> {
        *self.inner.lock() = Some(schedule.clone());
        Ok(())
    }
}

/// Atomically replaceable schedule snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedSchedule {
    current: Arc<RwLock<Arc<RawSchedule>>>,
}

impl SharedSchedule {
    pub fn new(schedule: RawSchedule) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(schedule))),
        }
    }

    /// Cheap handle to the schedule in effect right now.
    pub fn snapshot(&self) -> Arc<RawSchedule> {
        self.current.read().clone()
    }

    /// Swap in a whole new schedule.
    pub fn replace(&self, schedule: RawSchedule) {
        *self.current.write() = Arc::new(schedule);
    }
}

#[cfg(feature = "config")]
pub use file::FileStore;

#[cfg(feature = "config")]
mod file {
    use super::ScheduleStore;
    use crate::error::{Result, VakitError};
    use crate::schedule::RawSchedule;
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    /// TOML file of `key = "HH:MM"` pairs.
    ///
    /// Writes go to a sibling temp file first and are renamed into place.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut name = self
                .path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_default();
            name.push(".tmp");
            self.path.with_file_name(name)
        }
    }

    impl ScheduleStore for FileStore {
        fn load(&self) -> Result<RawSchedule> {
            let contents = match fs::read_to_string(&self.path) {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    return Ok(RawSchedule::default())
                }
                Err(err) => {
                    return Err(VakitError::file_error(
                        format!("reading {}", self.path.display()),
                        err,
                    ))
                }
            };

            let entries: BTreeMap<String, String> = toml::from_str(&contents).map_err(|e| {
                VakitError::store(format!("{} is not a schedule: {}", self.path.display(), e))
            })?;
            Ok(RawSchedule::from_entries(entries))
        }

        fn save(&self, schedule: &RawSchedule) -> Result<()> {
            let entries: BTreeMap<&str, &str> = schedule.entries().collect();
            let encoded = toml::to_string(&entries)
                .map_err(|e| VakitError::store(format!("encoding schedule: {}", e)))?;

            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|e| {
                        VakitError::file_error(format!("creating {}", parent.display()), e)
                    })?;
                }
            }

            let temp = self.temp_path();
            fs::write(&temp, encoded)
                .map_err(|e| VakitError::file_error(format!("writing {}", temp.display()), e))?;
            fs::rename(&temp, &self.path).map_err(|e| {
                VakitError::file_error(format!("replacing {}", self.path.display()), e)
            })?;
            Ok(())
        }
    }
}
