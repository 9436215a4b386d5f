use super::StorageBackend;
use crate::error::{ProductsError, Result};
use crate::model::{Collection, Product};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty collection document if none exists.
    ///
    /// Returns `true` when a new document was written.
    pub fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&[])?;
        Ok(true)
    }

    fn ensure_parent(&self) -> Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                fs::create_dir_all(dir).map_err(|e| ProductsError::write(&self.path, e))
            }
            _ => Ok(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("products.json");
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Collection> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| ProductsError::read(&self.path, e))?;
        let products: Collection =
            serde_json::from_str(&content).map_err(|e| ProductsError::read(&self.path, e))?;
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> Result<()> {
        self.ensure_parent()?;

        let content = serde_json::to_string_pretty(products)
            .map_err(|e| ProductsError::write(&self.path, e))?;

        // Atomic write
        let tmp_path = self.tmp_path();
        write_atomically(&self.path, &tmp_path, |file| file.write_all(content.as_bytes()))
            .map_err(|e| ProductsError::write(&self.path, e))?;

        tracing::trace!(path = %self.path.display(), count = products.len(), "collection saved");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

/// Removes the temp file on drop unless the rename went through.
struct TmpFile<'a> {
    path: &'a Path,
    persisted: bool,
}

impl Drop for TmpFile<'_> {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(self.path);
        }
    }
}

/// Write `tmp` with `fill`, then rename it over `target`. On any failure the
/// temp file is gone and `target` is untouched.
fn write_atomically<F>(target: &Path, tmp: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut guard = TmpFile {
        path: tmp,
        persisted: false,
    };
    let mut file = File::create(tmp)?;
    fill(&mut file)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp, target)?;
    guard.persisted = true;
    Ok(())
}
