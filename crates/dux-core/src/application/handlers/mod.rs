//! Command handlers.
//!
//! One handler per command. Handlers share the application's ports through
//! `Arc`s and report every side effect as an event.

mod create_blueprint;
mod define_file;
mod define_template;
mod describe_blueprint;
mod install;
mod list_templates;
mod render_blueprint;

pub use create_blueprint::CreateBlueprintHandler;
pub use define_file::DefineBlueprintFileHandler;
pub use define_template::DefineBlueprintTemplateHandler;
pub use describe_blueprint::DescribeBlueprintHandler;
pub use install::InstallHandler;
pub use list_templates::ListTemplatesHandler;
pub use render_blueprint::RenderBlueprintHandler;
