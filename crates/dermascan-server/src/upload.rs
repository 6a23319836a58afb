//! Scoped temporary storage for uploaded files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

/// An uploaded file spooled to disk, deleted when the guard drops.
///
/// Cleanup is unconditional: the `Drop` impl runs on every pipeline exit
/// path, including when the request future is dropped because the caller
/// disconnected mid-flight.
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Writes the upload into `dir` under a fresh random name.
    pub fn spool(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(Uuid::new_v4().to_string());
        fs::write(&path, bytes)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove temp upload {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("dermascan-upload-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn spooled_file_exists_until_drop() {
        let dir = scratch_dir();
        let upload = TempUpload::spool(&dir, b"fake image bytes").unwrap();
        let path = upload.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(fs::read(&path).unwrap(), b"fake image bytes");

        drop(upload);
        assert!(!path.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn two_spools_never_collide() {
        let dir = scratch_dir();
        let a = TempUpload::spool(&dir, b"a").unwrap();
        let b = TempUpload::spool(&dir, b"b").unwrap();
        assert_ne!(a.path(), b.path());

        drop(a);
        drop(b);
        fs::remove_dir_all(&dir).ok();
    }
}
