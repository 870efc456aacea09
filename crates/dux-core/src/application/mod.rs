//! Application layer for Dux.
//!
//! This layer contains:
//! - **Bus**: routes commands to handlers
//! - **Handlers**: one use case per command
//! - **Events**: the in-memory event store and subscription handles
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! Handlers coordinate the domain layer; the rules themselves live in
//! `crate::domain`.

pub mod app;
pub mod bus;
pub mod error;
pub mod events;
pub mod handlers;
pub mod ports;

pub use app::{Application, DEFAULT_BLUEPRINTS_DIR};
pub use bus::{CommandBus, Handler};
pub use error::ApplicationError;
pub use events::{Subscription, TransientEventStore};
pub use ports::{BlueprintStore, EventStore, FileSystem, Subscriber, TemplateEngine};
