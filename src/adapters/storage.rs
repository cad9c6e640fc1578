use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes output files into one directory. Each file is written to a
/// temporary sibling first and renamed into place, so an interrupted run
/// never leaves a half-written CSV behind.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.path_for(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = tmp_path_for(&full_path);
        if let Err(e) = fs::write(&tmp_path, data) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, &full_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path)
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_and_replaces() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("out"));

        let path = storage.write_file("zurich.csv", b"first").await.unwrap();
        assert_eq!(path, dir.path().join("out").join("zurich.csv"));
        assert_eq!(fs::read(&path).unwrap(), b"first");

        storage.write_file("zurich.csv", b"second").await.unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!dir.path().join("out").join("zurich.csv.tmp").exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();

        let storage = LocalStorage::new(&blocker);
        let err = storage.write_file("zurich.csv", b"data").await.unwrap_err();
        assert!(matches!(err, EtlError::IoError(_)));
    }
}
