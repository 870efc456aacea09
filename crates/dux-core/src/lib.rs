//! Dux Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the dux
//! blueprint scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             dux-cli (CLI)               │
//! │        builds Command values            │
//! └──────────────────┬──────────────────────┘
//!                    │ Application::execute
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        CommandBus -> handlers           │
//! │  (create, describe, template, file,     │
//! │   render, install, list-templates)      │
//! └──────────┬───────────────────┬──────────┘
//!            │ uses              │ emits
//!            ▼                   ▼
//! ┌────────────────────┐  ┌─────────────────┐
//! │ Ports (traits)     │  │   EventStore    │
//! │ FileSystem, Store, │  │ log + synchronous│
//! │ TemplateEngine     │  │  subscribers    │
//! └─────────┬──────────┘  └─────────────────┘
//!           │ implemented by
//!           ▼
//! ┌─────────────────────────────────────────┐
//! │     dux-adapters (Infrastructure)       │
//! │ MemoryFilesystem, JsonBlueprintStore,   │
//! │ HandlebarsEngine, ...                   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dux_core::prelude::*;
//!
//! # fn run(app: &Application) -> DuxResult<()> {
//! app.execute(&CreateBlueprint::new("component").into())?;
//!
//! let events = app.capture(&ListTemplates::new("component").into())?;
//! for event in events {
//!     println!("{}", event.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Application, CommandBus, Handler, Subscription, TransientEventStore,
        ports::{BlueprintStore, EventStore, FileSystem, TemplateEngine},
    };
    pub use crate::domain::{
        Blueprint, Command, CommandKind, CreateBlueprint, DefineBlueprintFile,
        DefineBlueprintTemplate, DescribeBlueprint, Event, EventKind, EventPayload, Install,
        ListTemplates, RenderBlueprint,
    };
    pub use crate::error::{DuxError, DuxResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
