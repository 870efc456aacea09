//! Filesystem adapters.

mod failing;
mod local;
mod memory;

pub use failing::{FailingFilesystem, FailureAction};
pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
