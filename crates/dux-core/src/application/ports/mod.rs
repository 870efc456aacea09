//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `dux-adapters` implement the
//! driven ports; the event store lives in this crate because it holds no I/O.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by handlers, implemented by infrastructure
//!   - `FileSystem`: file access
//!   - `BlueprintStore`: blueprint persistence
//!   - `TemplateEngine`: template rendering
//!   - `EventStore`: event log and notification

pub mod output;

pub use output::{BlueprintStore, EventStore, FileSystem, Subscriber, TemplateEngine};

#[cfg(test)]
pub use output::{MockBlueprintStore, MockFileSystem};
