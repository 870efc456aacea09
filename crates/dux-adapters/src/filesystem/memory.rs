//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    io::{self, Cursor, Read, Write},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use dux_core::{
    application::{ApplicationError, ports::FileSystem},
    error::DuxResult,
};

type Files = BTreeMap<PathBuf, Vec<u8>>;

/// In-memory filesystem.
///
/// Directories exist implicitly whenever a file lives below them. Paths are
/// normalised, so `./a/b` and `a/b` name the same file.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: Arc<RwLock<Files>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `contents` at `path`, replacing any previous file (testing helper).
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> DuxResult<()> {
        self.files
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .insert(normalize(path.as_ref()), contents.into());
        Ok(())
    }

    /// Read a file's content as UTF-8 (testing helper).
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        let files = self.files.read().ok()?;
        let bytes = files.get(&normalize(path.as_ref()))?;
        String::from_utf8(bytes.clone()).ok()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = normalize(path.as_ref());
        self.files
            .read()
            .map(|files| files.keys().any(|p| p.starts_with(&path)))
            .unwrap_or(false)
    }

    /// All file paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl FileSystem for MemoryFilesystem {
    fn open(&self, path: &Path) -> DuxResult<Box<dyn Read>> {
        let files = self
            .files
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let contents = files
            .get(&normalize(path))
            .ok_or_else(|| ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            })?;
        Ok(Box::new(Cursor::new(contents.clone())))
    }

    fn create(&self, path: &Path) -> DuxResult<Box<dyn Write>> {
        let path = normalize(path);
        self.files
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .insert(path.clone(), Vec::new());

        Ok(Box::new(MemoryFile {
            path,
            files: Arc::clone(&self.files),
        }))
    }

    fn list(&self, dir: &Path) -> DuxResult<Vec<String>> {
        let dir = normalize(dir);
        let files = self
            .files
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let names: BTreeSet<String> = files
            .keys()
            .filter_map(|path| path.strip_prefix(&dir).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| first.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(names.into_iter().collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> DuxResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let contents = files
            .remove(&normalize(from))
            .ok_or_else(|| ApplicationError::FileNotFound {
                path: from.to_path_buf(),
            })?;
        files.insert(normalize(to), contents);
        Ok(())
    }
}

/// Writer whose bytes land in the shared map as they are written.
struct MemoryFile {
    path: PathBuf,
    files: Arc<RwLock<Files>>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut files = self
            .files
            .write()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))?;
        files.entry(self.path.clone()).or_default().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(fs: &MemoryFilesystem, path: &str) -> String {
        let mut out = String::new();
        fs.open(Path::new(path))
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn create_then_open_round_trips() {
        let fs = MemoryFilesystem::new();
        let mut w = fs.create(Path::new("a/b.txt")).unwrap();
        w.write_all(b"hello").unwrap();

        assert_eq!(read(&fs, "a/b.txt"), "hello");
    }

    #[test]
    fn create_truncates() {
        let fs = MemoryFilesystem::new();
        fs.insert("a.txt", "old contents").unwrap();
        fs.create(Path::new("a.txt")).unwrap().write_all(b"new").unwrap();

        assert_eq!(read(&fs, "a.txt"), "new");
    }

    #[test]
    fn open_missing_is_not_found() {
        let fs = MemoryFilesystem::new();
        assert!(fs.open(Path::new("nope")).err().unwrap().is_not_found());
    }

    #[test]
    fn curdir_components_are_ignored() {
        let fs = MemoryFilesystem::new();
        fs.insert("./x/y", "1").unwrap();

        assert_eq!(fs.read_to_string("x/./y").as_deref(), Some("1"));
        assert!(fs.exists("x"));
    }

    #[test]
    fn list_returns_sorted_immediate_children() {
        let fs = MemoryFilesystem::new();
        fs.insert("t/b.tmpl", "").unwrap();
        fs.insert("t/a.tmpl", "").unwrap();
        fs.insert("t/sub/deep.tmpl", "").unwrap();
        fs.insert("other/c.tmpl", "").unwrap();

        assert_eq!(fs.list(Path::new("t")).unwrap(), vec!["a.tmpl", "b.tmpl", "sub"]);
        assert!(fs.list(Path::new("missing")).unwrap().is_empty());
    }

    #[test]
    fn rename_moves_contents() {
        let fs = MemoryFilesystem::new();
        fs.insert("staging/x", "data").unwrap();

        fs.rename(Path::new("staging/x"), Path::new("./dest/x")).unwrap();

        assert_eq!(fs.read_to_string("dest/x").as_deref(), Some("data"));
        assert!(!fs.exists("staging/x"));
        assert!(fs.rename(Path::new("staging/x"), Path::new("y")).is_err());
    }
}
