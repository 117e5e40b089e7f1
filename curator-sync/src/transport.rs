//! File transport — byte-exact copies and removals.
//!
//! `copy` goes through a `.curator.tmp` sibling and renames into place
//! (atomic on POSIX), so a reader never observes a half-written destination.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Copy the bytes at `src` to `dst`, creating intermediate directories for
/// `dst` as needed.
pub fn copy(src: &Path, dst: &Path) -> Result<(), SyncError> {
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.curator.tmp", dst.display()));
    std::fs::copy(src, &tmp).map_err(|e| io_err(src, e))?;
    if let Err(e) = std::fs::rename(&tmp, dst) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(dst, e));
    }

    tracing::debug!("copied: {} -> {}", src.display(), dst.display());
    Ok(())
}

/// Remove the file at `path`. An already-absent file is not an error.
pub fn remove(path: &Path) -> Result<(), SyncError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("removed: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        std::fs::write(&src, b"payload").unwrap();

        let dst = tmp.path().join("deep").join("nested").join("dst.txt");
        copy(&src, &dst).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"payload");
    }

    #[test]
    fn copy_is_byte_exact() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.bin");
        let bytes: Vec<u8> = (0..=255).collect();
        std::fs::write(&src, &bytes).unwrap();

        let dst = tmp.path().join("dst.bin");
        copy(&src, &dst).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), bytes);
    }

    #[test]
    fn tmp_file_removed_after_copy() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        std::fs::write(&src, b"x").unwrap();
        let dst = tmp.path().join("dst.txt");
        copy(&src, &dst).unwrap();

        let tmp_path = PathBuf::from(format!("{}.curator.tmp", dst.display()));
        assert!(!tmp_path.exists(), ".curator.tmp must be cleaned up");
    }

    #[test]
    fn copy_overwrites_existing_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst.txt");
        std::fs::write(&src, b"new").unwrap();
        std::fs::write(&dst, b"old").unwrap();

        copy(&src, &dst).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn copy_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let err = copy(&tmp.path().join("ghost"), &tmp.path().join("dst")).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }

    #[test]
    fn remove_missing_file_is_ok() {
        let tmp = TempDir::new().unwrap();
        remove(&tmp.path().join("never-existed")).unwrap();
    }

    #[test]
    fn remove_deletes_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doomed.txt");
        std::fs::write(&path, b"x").unwrap();
        remove(&path).unwrap();
        assert!(!path.exists());
    }
}
