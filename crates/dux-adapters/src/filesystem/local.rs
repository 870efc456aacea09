//! Local filesystem adapter using std::fs.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use dux_core::{
    application::{ApplicationError, ports::FileSystem},
    error::{DuxError, DuxResult},
};

/// Production filesystem anchored at a root directory.
///
/// Relative paths resolve against the root; absolute paths are used as is.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Anchor at the process's working directory.
    pub fn current_dir() -> DuxResult<Self> {
        let root = std::env::current_dir().map_err(|e| map_io_error(Path::new("."), &e))?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn create_parent(path: &Path) -> DuxResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| map_io_error(parent, &e))
            }
            _ => Ok(()),
        }
    }
}

impl FileSystem for LocalFilesystem {
    fn open(&self, path: &Path) -> DuxResult<Box<dyn Read>> {
        let file = File::open(self.resolve(path)).map_err(|e| map_io_error(path, &e))?;
        Ok(Box::new(file))
    }

    fn create(&self, path: &Path) -> DuxResult<Box<dyn Write>> {
        let full = self.resolve(path);
        Self::create_parent(&full)?;
        let file = File::create(&full).map_err(|e| map_io_error(path, &e))?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn list(&self, dir: &Path) -> DuxResult<Vec<String>> {
        let full = self.resolve(dir);
        if !full.is_dir() {
            debug!(dir = %full.display(), "directory missing, nothing to list");
            return Ok(Vec::new());
        }

        WalkDir::new(&full)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .map_err(|e| map_io_error(dir, &io::Error::from(e)))
            })
            .collect()
    }

    fn rename(&self, from: &Path, to: &Path) -> DuxResult<()> {
        let target = self.resolve(to);
        Self::create_parent(&target)?;
        fs::rename(self.resolve(from), &target).map_err(|e| map_io_error(from, &e))
    }
}

fn map_io_error(path: &Path, e: &io::Error) -> DuxError {
    ApplicationError::filesystem(path, e).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn local() -> (TempDir, LocalFilesystem) {
        let dir = TempDir::new().unwrap();
        let local = LocalFilesystem::new(dir.path());
        (dir, local)
    }

    #[test]
    fn create_makes_parent_directories() {
        let (dir, local) = local();
        let mut w = local.create(Path::new("a/b/c.txt")).unwrap();
        w.write_all(b"hi").unwrap();
        w.flush().unwrap();
        drop(w);

        assert_eq!(fs::read_to_string(dir.path().join("a/b/c.txt")).unwrap(), "hi");
    }

    #[test]
    fn open_missing_is_not_found() {
        let (_dir, local) = local();
        assert!(local.open(Path::new("nope")).err().unwrap().is_not_found());
    }

    #[test]
    fn list_is_sorted_and_shallow() {
        let (dir, local) = local();
        fs::create_dir_all(dir.path().join("t/sub")).unwrap();
        fs::write(dir.path().join("t/b"), "").unwrap();
        fs::write(dir.path().join("t/a"), "").unwrap();
        fs::write(dir.path().join("t/sub/deep"), "").unwrap();

        assert_eq!(local.list(Path::new("t")).unwrap(), vec!["a", "b", "sub"]);
    }

    #[test]
    fn list_missing_directory_is_empty() {
        let (_dir, local) = local();
        assert!(local.list(Path::new("missing")).unwrap().is_empty());
    }

    #[test]
    fn rename_creates_destination_parent() {
        let (dir, local) = local();
        fs::write(dir.path().join("staged"), "x").unwrap();

        local.rename(Path::new("staged"), Path::new("deep/er/final")).unwrap();

        assert!(dir.path().join("deep/er/final").is_file());
        assert!(!dir.path().join("staged").exists());
    }
}
