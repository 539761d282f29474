//! RAII guard for locally materialized audio.

use std::path::{Path, PathBuf};

/// A locally materialized audio file, removed on drop.
///
/// The guard owns the temporary path for the duration of one pipeline
/// invocation. Dropping it deletes the file; a failed delete is ignored
/// (the OS temp directory is the backstop).
///
/// # Examples
///
/// ```no_run
/// use anamnesis_storage::TempAudio;
///
/// let guard = TempAudio::new("/tmp/anamnesis-abc123.webm");
/// let path = guard.path().to_path_buf();
/// drop(guard); // file at `path` is gone
/// ```
#[derive(Debug)]
pub struct TempAudio {
    path: PathBuf,
}

impl TempAudio {
    /// Take ownership of a temporary file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The local file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove temporary audio file"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_removes_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("anamnesis-temp-guard-{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"audio").unwrap();
        assert!(path.exists());

        drop(TempAudio::new(&path));
        assert!(!path.exists());
    }

    #[test]
    fn drop_tolerates_missing_file() {
        let path = std::env::temp_dir().join(format!("anamnesis-gone-{}", uuid::Uuid::new_v4()));
        drop(TempAudio::new(&path));
    }
}
