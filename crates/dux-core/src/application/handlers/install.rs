use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::Handler;
use crate::application::ports::{EventStore, FileSystem};
use crate::domain::{DomainError, Event, EventKind, Install};
use crate::error::DuxResult;

/// Moves staged files into place.
///
/// Every pair is attempted and reported; a failed rename never stops the
/// rest, so the handler only fails on a malformed command.
pub struct InstallHandler {
    fs: Arc<dyn FileSystem>,
    events: Arc<dyn EventStore>,
}

impl InstallHandler {
    pub fn new(fs: Arc<dyn FileSystem>, events: Arc<dyn EventStore>) -> Self {
        Self { fs, events }
    }
}

impl Handler for InstallHandler {
    type Command = Install;

    #[instrument(skip_all, fields(files = command.sources.len()))]
    fn handle(&self, command: &Install) -> DuxResult<()> {
        if command.sources.len() != command.destinations.len() {
            return Err(DomainError::MismatchedInstallPaths {
                sources: command.sources.len(),
                destinations: command.destinations.len(),
            }
            .into());
        }

        for (from, to) in command.sources.iter().zip(&command.destinations) {
            let event = match self.fs.rename(from, to) {
                Ok(()) => {
                    debug!(from = %from.display(), to = %to.display(), "installed");
                    Event::new(EventKind::FileRenamed)
                }
                Err(e) => {
                    warn!(from = %from.display(), to = %to.display(), error = %e, "install failed");
                    Event::new(EventKind::FileRenameFailed).with_error(e)
                }
            };

            self.events.emit(vec![
                event
                    .with("from", from.to_string_lossy())
                    .with("to", to.to_string_lossy()),
            ]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, TransientEventStore};
    use crate::application::ports::MockFileSystem;
    use std::path::{Path, PathBuf};

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let mut fs = MockFileSystem::new();
        fs.expect_rename().times(2).returning(|from, _| {
            if from == Path::new("s1") {
                Err(ApplicationError::FileNotFound { path: from.into() }.into())
            } else {
                Ok(())
            }
        });
        let events = Arc::new(TransientEventStore::new());

        InstallHandler::new(Arc::new(fs), events.clone())
            .handle(&Install::new(paths(&["s1", "s2"]), paths(&["d1", "d2"])))
            .unwrap();

        let all = events.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name(), "file-rename-failed");
        assert_eq!(all[0].get_str("from"), Some("s1"));
        assert!(all[0].error().is_some());
        assert_eq!(all[1].name(), "file-renamed");
        assert_eq!(all[1].get_str("to"), Some("d2"));
    }

    #[test]
    fn mismatched_lengths_rename_nothing() {
        let mut fs = MockFileSystem::new();
        fs.expect_rename().never();
        let events = Arc::new(TransientEventStore::new());

        let err = InstallHandler::new(Arc::new(fs), events.clone())
            .handle(&Install::new(paths(&["s1", "s2"]), paths(&["d1"])))
            .unwrap_err();

        assert!(err.to_string().contains("2 sources but 1 destinations"));
        assert!(events.all().is_empty());
    }

    #[test]
    fn empty_install_is_a_no_op() {
        let events = Arc::new(TransientEventStore::new());
        InstallHandler::new(Arc::new(MockFileSystem::new()), events.clone())
            .handle(&Install::new(vec![], vec![]))
            .unwrap();
        assert!(events.all().is_empty());
    }
}
