//! Blueprint store adapters.

mod json;

pub use json::JsonBlueprintStore;
