//! Fault-injecting filesystem wrapper.

use std::collections::HashSet;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use dux_core::{
    application::{ApplicationError, ports::FileSystem},
    error::DuxResult,
};

/// Operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureAction {
    /// `open` returns an error.
    Open,
    /// `create` returns an error.
    Create,
    /// `create` succeeds but every write to the file fails.
    Write,
    /// `rename` from the path returns an error.
    Rename,
}

/// Wraps another filesystem and fails preconfigured actions on given paths.
///
/// ```
/// use std::path::Path;
/// use dux_adapters::filesystem::{FailingFilesystem, FailureAction, MemoryFilesystem};
/// use dux_core::application::ports::FileSystem;
///
/// let fs = FailingFilesystem::new(MemoryFilesystem::new())
///     .fail(FailureAction::Create, "staging/locked");
/// assert!(fs.create(Path::new("staging/locked")).is_err());
/// assert!(fs.create(Path::new("staging/open")).is_ok());
/// ```
#[derive(Clone)]
pub struct FailingFilesystem {
    inner: Arc<dyn FileSystem>,
    failures: HashSet<(FailureAction, PathBuf)>,
}

impl FailingFilesystem {
    /// Wrap `inner` without any failures configured.
    pub fn new(inner: impl FileSystem + 'static) -> Self {
        Self::wrap(Arc::new(inner))
    }

    pub fn wrap(inner: Arc<dyn FileSystem>) -> Self {
        Self {
            inner,
            failures: HashSet::new(),
        }
    }

    /// Make `action` fail for `path`.
    pub fn fail(mut self, action: FailureAction, path: impl AsRef<Path>) -> Self {
        self.failures.insert((action, normalize(path.as_ref())));
        self
    }

    fn fails(&self, action: FailureAction, path: &Path) -> bool {
        self.failures.contains(&(action, normalize(path)))
    }

    fn injected(path: &Path, action: &str) -> ApplicationError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("injected {action} failure"),
        }
    }
}

impl FileSystem for FailingFilesystem {
    fn open(&self, path: &Path) -> DuxResult<Box<dyn Read>> {
        if self.fails(FailureAction::Open, path) {
            return Err(Self::injected(path, "open").into());
        }
        self.inner.open(path)
    }

    fn create(&self, path: &Path) -> DuxResult<Box<dyn Write>> {
        if self.fails(FailureAction::Create, path) {
            return Err(Self::injected(path, "create").into());
        }
        let file = self.inner.create(path)?;
        if self.fails(FailureAction::Write, path) {
            return Ok(Box::new(FailingWriter { _inner: file }));
        }
        Ok(file)
    }

    fn list(&self, dir: &Path) -> DuxResult<Vec<String>> {
        self.inner.list(dir)
    }

    fn rename(&self, from: &Path, to: &Path) -> DuxResult<()> {
        if self.fails(FailureAction::Rename, from) {
            return Err(Self::injected(from, "rename").into());
        }
        self.inner.rename(from, to)
    }
}

impl std::fmt::Debug for FailingFilesystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailingFilesystem")
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

/// Keeps the real file open but refuses every write.
struct FailingWriter {
    _inner: Box<dyn Write>,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other(format!("writing {} bytes failed", buf.len())))
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
