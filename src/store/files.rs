use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{AppError, AppResult};

/// The JSON documents kept in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    Transactions,
    Categories,
    Settings,
}

impl DataFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Transactions => "data.json",
            Self::Categories => "categories.json",
            Self::Settings => "settings.json",
        }
    }
}

/// Flat-file persistence: one pretty-printed JSON document per [`DataFile`].
///
/// Every read-modify-write goes through [`DataStore::update`], which holds a
/// single writer lock for the whole cycle and replaces the file atomically
/// (temp file + rename). Two concurrent updates therefore apply one after the
/// other instead of overwriting each other.
#[derive(Debug)]
pub struct DataStore {
    root: PathBuf,
    writer: Mutex<()>,
}

impl DataStore {
    /// Open (and create if needed) the data directory.
    pub fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(dir = %root.display(), "Opened data directory");
        Ok(Self {
            root,
            writer: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file: DataFile) -> PathBuf {
        self.root.join(file.file_name())
    }

    /// Read a document, or `default()` when the file does not exist yet.
    pub fn read_or_else<T, F>(&self, file: DataFile, default: F) -> AppResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.path(file);
        match fs::read(&path) {
            Ok(bytes) => {
                trace!(path = %path.display(), bytes = bytes.len(), "Read data file");
                Ok(serde_json::from_slice(&bytes)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read, modify and write back a document under the writer lock.
    ///
    /// Nothing is written when `f` fails.
    pub fn update<T, R, D, F>(&self, file: DataFile, default: D, f: F) -> AppResult<R>
    where
        T: Serialize + DeserializeOwned,
        D: FnOnce() -> T,
        F: FnOnce(&mut T) -> AppResult<R>,
    {
        let _guard = self.lock()?;
        let mut value = self.read_or_else(file, default)?;
        let result = f(&mut value)?;
        self.write_unlocked(file, &value)?;
        Ok(result)
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|_| AppError::Internal("Data store writer lock poisoned".into()))
    }

    fn write_unlocked<T: Serialize>(&self, file: DataFile, value: &T) -> AppResult<()> {
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(value)?;

        {
            let mut f = fs::File::create(&tmp)?;
            f.write_all(&json)?;
            f.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = json.len(), "Wrote data file");
        Ok(())
    }
}
