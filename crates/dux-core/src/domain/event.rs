//! Domain events.
//!
//! Events are the externally observable trace of a command: every handler
//! emits exactly one event per completed side effect, successful or not.
//! Once built an event is never mutated.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::DuxError;

/// Unordered key-value pairs carrying event-specific information.
pub type EventPayload = Map<String, Value>;

/// The closed set of events emitted by the command handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum EventKind {
    BlueprintCreated,
    BlueprintDescriptionSet,
    BlueprintTemplateDefined,
    BlueprintFileAdded,
    BlueprintTemplateFound,
    TemplateRendered,
    RenderDestinationFilenameFailed,
    CreateDestinationFileFailed,
    RenderTemplateFailed,
    FileRenamed,
    FileRenameFailed,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        Self::BlueprintCreated,
        Self::BlueprintDescriptionSet,
        Self::BlueprintTemplateDefined,
        Self::BlueprintFileAdded,
        Self::BlueprintTemplateFound,
        Self::TemplateRendered,
        Self::RenderDestinationFilenameFailed,
        Self::CreateDestinationFileFailed,
        Self::RenderTemplateFailed,
        Self::FileRenamed,
        Self::FileRenameFailed,
    ];

    /// Stable wire name of the event.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlueprintCreated => "blueprint-created",
            Self::BlueprintDescriptionSet => "blueprint-description-set",
            Self::BlueprintTemplateDefined => "blueprint-template-defined",
            Self::BlueprintFileAdded => "blueprint-file-added",
            Self::BlueprintTemplateFound => "blueprint-template-found",
            Self::TemplateRendered => "template-rendered",
            Self::RenderDestinationFilenameFailed => "render-destination-filename-failed",
            Self::CreateDestinationFileFailed => "create-destination-file-failed",
            Self::RenderTemplateFailed => "render-template-failed",
            Self::FileRenamed => "file-renamed",
            Self::FileRenameFailed => "file-rename-failed",
        }
    }

    /// Failure kinds report a per-item error of a batch command.
    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            Self::RenderDestinationFilenameFailed
                | Self::CreateDestinationFileFailed
                | Self::RenderTemplateFailed
                | Self::FileRenameFailed
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EventKind> for &'static str {
    fn from(kind: EventKind) -> Self {
        kind.as_str()
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown event: {s}"))
    }
}

/// Documents an action that has taken place.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: Uuid,
    name: EventKind,
    payload: EventPayload,
    #[serde(serialize_with = "serialize_error", skip_serializing_if = "Option::is_none")]
    error: Option<DuxError>,
    occurred_at: DateTime<Utc>,
}

impl Event {
    /// Start a new event with an empty payload.
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: kind,
            payload: EventPayload::new(),
            error: None,
            occurred_at: Utc::now(),
        }
    }

    /// Add a payload entry.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_owned(), value.into());
        self
    }

    /// Attach the error that caused a failure event.
    pub fn with_error(mut self, error: DuxError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.name
    }

    pub fn name(&self) -> &'static str {
        self.name.as_str()
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// String payload entry, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    pub fn error(&self) -> Option<&DuxError> {
        self.error.as_ref()
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// `true` when every entry of `expected` is present with an equal value.
    pub fn payload_contains(&self, expected: &EventPayload) -> bool {
        expected
            .iter()
            .all(|(key, value)| self.payload.get(key) == Some(value))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, Value::Object(self.payload.clone()))?;
        if let Some(error) = &self.error {
            write!(f, " ({error})")?;
        }
        Ok(())
    }
}

fn serialize_error<S: Serializer>(error: &Option<DuxError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_str(&e.to_string()),
        None => s.serialize_none(),
    }
}
