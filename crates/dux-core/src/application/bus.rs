//! Command dispatch.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{Command, CommandKind, CommandSpec};
use crate::error::DuxResult;

/// Executes one concrete command type.
pub trait Handler: Send + Sync {
    type Command: CommandSpec;

    fn handle(&self, command: &Self::Command) -> DuxResult<()>;
}

type ErasedHandler = Box<dyn Fn(&Command) -> DuxResult<()> + Send + Sync>;

/// Routes each command to the single handler registered for its name.
#[derive(Default)]
pub struct CommandBus {
    handlers: HashMap<CommandKind, ErasedHandler>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for its command type, replacing any previous one.
    pub fn handle<H>(&mut self, handler: H)
    where
        H: Handler + 'static,
    {
        self.handle_fn(move |command: &H::Command| handler.handle(command));
    }

    /// Register a closure for command type `C`, replacing any previous one.
    pub fn handle_fn<C, F>(&mut self, f: F)
    where
        C: CommandSpec,
        F: Fn(&C) -> DuxResult<()> + Send + Sync + 'static,
    {
        let erased: ErasedHandler = Box::new(move |command: &Command| {
            let concrete = C::from_command(command).ok_or_else(|| {
                ApplicationError::InvalidCommand {
                    reason: format!("{} handler received {}", C::KIND, command.name()),
                }
            })?;
            f(concrete)
        });

        if self.handlers.insert(C::KIND, erased).is_some() {
            debug!(command = C::KIND.as_str(), "handler replaced");
        }
    }

    /// Run the handler registered for `command`.
    ///
    /// # Errors
    /// `CommandNotImplemented` when no handler is registered, otherwise
    /// whatever the handler returns.
    pub fn execute(&self, command: &Command) -> DuxResult<()> {
        let handler = self.handlers.get(&command.kind()).ok_or_else(|| {
            ApplicationError::CommandNotImplemented {
                command: command.name().into(),
            }
        })?;

        debug!(command = command.name(), "dispatch");
        handler(command)
    }

    pub fn is_registered(&self, kind: CommandKind) -> bool {
        self.handlers.contains_key(&kind)
    }
}

impl fmt::Debug for CommandBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("CommandBus").field("handlers", &kinds).finish()
    }
}
