//! Commands accepted by the command bus.
//!
//! Each command is a plain data carrier. The closed [`Command`] union is what
//! travels through the bus; the concrete structs are what handlers receive.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

/// Stable command names, used as bus keys and in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum CommandKind {
    CreateBlueprint,
    DescribeBlueprint,
    DefineBlueprintTemplate,
    DefineBlueprintFile,
    RenderBlueprint,
    Install,
    ListTemplates,
}

impl CommandKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateBlueprint => "create-blueprint",
            Self::DescribeBlueprint => "describe-blueprint",
            Self::DefineBlueprintTemplate => "define-blueprint-template",
            Self::DefineBlueprintFile => "define-blueprint-file",
            Self::RenderBlueprint => "render-blueprint",
            Self::Install => "install",
            Self::ListTemplates => "list-templates",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CommandKind> for &'static str {
    fn from(kind: CommandKind) -> Self {
        kind.as_str()
    }
}

/// Create a new, empty blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBlueprint {
    pub name: String,
}

impl CreateBlueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Set the description of an existing blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeBlueprint {
    pub blueprint_name: String,
    pub description: String,
}

impl DescribeBlueprint {
    pub fn new(blueprint_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            blueprint_name: blueprint_name.into(),
            description: description.into(),
        }
    }
}

/// Store template text under a name within a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefineBlueprintTemplate {
    pub blueprint_name: String,
    pub template_name: String,
    pub contents: String,
}

impl DefineBlueprintTemplate {
    pub fn new(
        blueprint_name: impl Into<String>,
        template_name: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            blueprint_name: blueprint_name.into(),
            template_name: template_name.into(),
            contents: contents.into(),
        }
    }
}

/// Map a destination file name to a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefineBlueprintFile {
    pub blueprint_name: String,
    pub file_name: String,
    pub template_name: String,
}

impl DefineBlueprintFile {
    pub fn new(
        blueprint_name: impl Into<String>,
        file_name: impl Into<String>,
        template_name: impl Into<String>,
    ) -> Self {
        Self {
            blueprint_name: blueprint_name.into(),
            file_name: file_name.into(),
            template_name: template_name.into(),
        }
    }
}

/// Render every file of a blueprint into `destination`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderBlueprint {
    pub name: String,
    pub destination: PathBuf,
    /// Template data, usually a JSON object.
    pub data: Value,
}

impl RenderBlueprint {
    pub fn new(name: impl Into<String>, destination: impl Into<PathBuf>, data: Value) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            data,
        }
    }
}

/// Move each `sources[i]` to `destinations[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Install {
    pub sources: Vec<PathBuf>,
    pub destinations: Vec<PathBuf>,
}

impl Install {
    pub fn new(sources: Vec<PathBuf>, destinations: Vec<PathBuf>) -> Self {
        Self {
            sources,
            destinations,
        }
    }

    /// Build from `(source, destination)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (PathBuf, PathBuf)>) -> Self {
        let (sources, destinations) = pairs.into_iter().unzip();
        Self {
            sources,
            destinations,
        }
    }
}

/// Report every template stored for a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTemplates {
    pub blueprint_name: String,
}

impl ListTemplates {
    pub fn new(blueprint_name: impl Into<String>) -> Self {
        Self {
            blueprint_name: blueprint_name.into(),
        }
    }
}

/// The closed set of commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Command {
    CreateBlueprint(CreateBlueprint),
    DescribeBlueprint(DescribeBlueprint),
    DefineBlueprintTemplate(DefineBlueprintTemplate),
    DefineBlueprintFile(DefineBlueprintFile),
    RenderBlueprint(RenderBlueprint),
    Install(Install),
    ListTemplates(ListTemplates),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::CreateBlueprint(_) => CommandKind::CreateBlueprint,
            Self::DescribeBlueprint(_) => CommandKind::DescribeBlueprint,
            Self::DefineBlueprintTemplate(_) => CommandKind::DefineBlueprintTemplate,
            Self::DefineBlueprintFile(_) => CommandKind::DefineBlueprintFile,
            Self::RenderBlueprint(_) => CommandKind::RenderBlueprint,
            Self::Install(_) => CommandKind::Install,
            Self::ListTemplates(_) => CommandKind::ListTemplates,
        }
    }

    /// Stable command name.
    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Binds a concrete command struct to its variant of [`Command`].
///
/// The bus keys handlers by `KIND` and uses `from_command` to hand each
/// handler its own concrete type.
pub trait CommandSpec: fmt::Debug + Send + Sync + 'static {
    const KIND: CommandKind;

    /// Borrow the concrete command out of the union, if it is this variant.
    fn from_command(command: &Command) -> Option<&Self>;
}

macro_rules! command_spec {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl CommandSpec for $variant {
                const KIND: CommandKind = CommandKind::$variant;

                fn from_command(command: &Command) -> Option<&Self> {
                    match command {
                        Command::$variant(c) => Some(c),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Command {
                fn from(c: $variant) -> Self {
                    Command::$variant(c)
                }
            }
        )+
    };
}

command_spec!(
    CreateBlueprint,
    DescribeBlueprint,
    DefineBlueprintTemplate,
    DefineBlueprintFile,
    RenderBlueprint,
    Install,
    ListTemplates,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_are_stable() {
        let cases: Vec<(Command, &str)> = vec![
            (CreateBlueprint::new("a").into(), "create-blueprint"),
            (DescribeBlueprint::new("a", "d").into(), "describe-blueprint"),
            (
                DefineBlueprintTemplate::new("a", "t", "c").into(),
                "define-blueprint-template",
            ),
            (
                DefineBlueprintFile::new("a", "f", "t").into(),
                "define-blueprint-file",
            ),
            (
                RenderBlueprint::new("a", "staging", json!({})).into(),
                "render-blueprint",
            ),
            (Install::new(vec![], vec![]).into(), "install"),
            (ListTemplates::new("a").into(), "list-templates"),
        ];

        for (command, name) in cases {
            assert_eq!(command.name(), name);
        }
    }

    #[test]
    fn extraction_matches_only_own_variant() {
        let command: Command = CreateBlueprint::new("a").into();

        assert_eq!(
            CreateBlueprint::from_command(&command).map(|c| c.name.as_str()),
            Some("a")
        );
        assert!(ListTemplates::from_command(&command).is_none());
    }

    #[test]
    fn install_from_pairs_keeps_order() {
        let install = Install::from_pairs(vec![
            (PathBuf::from("s1"), PathBuf::from("d1")),
            (PathBuf::from("s2"), PathBuf::from("d2")),
        ]);
        assert_eq!(install.sources, vec![PathBuf::from("s1"), PathBuf::from("s2")]);
        assert_eq!(install.destinations, vec![PathBuf::from("d1"), PathBuf::from("d2")]);
    }

    #[test]
    fn serializes_with_command_tag() {
        let value = serde_json::to_value(Command::from(CreateBlueprint::new("a"))).unwrap();
        assert_eq!(value, json!({ "command": "create-blueprint", "name": "a" }));
    }
}
