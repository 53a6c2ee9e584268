use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`. Absolute paths bypass the root.
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

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => EtlError::InputNotFound {
                path: full_path.display().to_string(),
            },
            _ => EtlError::Read {
                path: full_path.display().to_string(),
                source,
            },
        })
    }

    // Truncates in place; the parent directory must already exist.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        write_all(&full_path, data).map_err(|source| EtlError::Write {
            path: full_path.display().to_string(),
            source,
        })
    }
}

fn write_all(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    file.flush()
}
