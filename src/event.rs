//! Event module defining the event kinds and the envelope sent per tracking call.
//!
//! Every tracking call produces exactly one [`EventEnvelope`]. Envelopes are built
//! from an owned copy of the caller's metadata and never reused.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary caller-supplied key/value metadata.
pub type Metadata = Map<String, Value>;

/// Envelope key holding the nested click metadata.
pub const NESTED_METADATA_KEY: &str = "metaData";

/// Key injected with the click label.
pub const BUTTON_KEY: &str = "button";

const TYPE_KEY: &str = "type";
const PROJECT_ID_KEY: &str = "projectId";

/// Semantic category of a tracked action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Click,
    Log,
    Event,
    Visit,
    Error,
    FormInteract,
    FormSubmit,
    SessionStart,
    SessionEnd,
}

impl EventKind {
    /// Get all event kinds.
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::Click,
            EventKind::Log,
            EventKind::Event,
            EventKind::Visit,
            EventKind::Error,
            EventKind::FormInteract,
            EventKind::FormSubmit,
            EventKind::SessionStart,
            EventKind::SessionEnd,
        ]
    }

    /// Get the wire name of the event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "CLICK",
            EventKind::Log => "LOG",
            EventKind::Event => "EVENT",
            EventKind::Visit => "VISIT",
            EventKind::Error => "ERROR",
            EventKind::FormInteract => "FORM_INTERACT",
            EventKind::FormSubmit => "FORM_SUBMIT",
            EventKind::SessionStart => "SESSION_START",
            EventKind::SessionEnd => "SESSION_END",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How click metadata is laid out in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickShape {
    /// Metadata nested under `metaData`, with `button` added inside it.
    #[default]
    Nested,

    /// Metadata flattened to the top level with `button` alongside, like every other kind.
    Flat,
}

impl std::str::FromStr for ClickShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(ClickShape::Nested),
            "flat" => Ok(ClickShape::Flat),
            other => Err(format!("'{}' is not a click shape (expected nested or flat)", other)),
        }
    }
}

/// The JSON object transmitted for one tracking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event kind
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Project identifier copied from the client
    #[serde(rename = "projectId")]
    pub project_id: String,

    /// Remaining top-level fields
    #[serde(flatten)]
    pub fields: Metadata,
}

impl EventEnvelope {
    /// Build an envelope with metadata merged into the top level.
    ///
    /// Caller keys named `type` or `projectId` are dropped so the canonical
    /// values always win.
    pub fn flat(kind: EventKind, project_id: impl Into<String>, mut metadata: Metadata) -> Self {
        metadata.remove(TYPE_KEY);
        metadata.remove(PROJECT_ID_KEY);

        Self {
            kind,
            project_id: project_id.into(),
            fields: metadata,
        }
    }

    /// Build a click envelope in the requested shape.
    pub fn click(
        project_id: impl Into<String>,
        label: impl Into<String>,
        mut metadata: Metadata,
        shape: ClickShape,
    ) -> Self {
        metadata.insert(BUTTON_KEY.to_string(), Value::String(label.into()));

        match shape {
            ClickShape::Nested => {
                let mut fields = Metadata::new();
                fields.insert(NESTED_METADATA_KEY.to_string(), Value::Object(metadata));
                Self {
                    kind: EventKind::Click,
                    project_id: project_id.into(),
                    fields,
                }
            }
            ClickShape::Flat => Self::flat(EventKind::Click, project_id, metadata),
        }
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
