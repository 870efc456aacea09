//! Core domain layer for Dux.
//!
//! Pure data and rules: blueprints, commands, events and name validation.
//! All I/O goes through the ports defined in the application layer.

pub mod blueprint;
pub mod command;
pub mod error;
pub mod event;
pub mod identifier;

mod validation;

pub use blueprint::Blueprint;
pub use command::{
    Command, CommandKind, CommandSpec, CreateBlueprint, DefineBlueprintFile,
    DefineBlueprintTemplate, DescribeBlueprint, Install, ListTemplates, RenderBlueprint,
};
pub use error::DomainError;
pub use event::{Event, EventKind, EventPayload};
pub use validation::{DomainValidator, RECORD_SUFFIX};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blueprint_accepts_templated_destinations() {
        let mut bp = Blueprint::new("component").unwrap();
        bp.define_file("{{name}}/mod.rs", "mod.tmpl").unwrap();
        assert_eq!(bp.template_for("{{name}}/mod.rs"), Some("mod.tmpl"));
    }

    #[test]
    fn command_and_event_names_do_not_collide() {
        let commands = [
            CommandKind::CreateBlueprint,
            CommandKind::DescribeBlueprint,
            CommandKind::DefineBlueprintTemplate,
            CommandKind::DefineBlueprintFile,
            CommandKind::RenderBlueprint,
            CommandKind::Install,
            CommandKind::ListTemplates,
        ];
        for command in commands {
            assert!(command.as_str().parse::<EventKind>().is_err());
        }
    }
}
