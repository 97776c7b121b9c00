//! Display records for picked parts.

use std::fmt;

use log::warn;
use serde_json::Value;

use crate::picking::PickResult;
use crate::scene::{Hierarchy, Metadata, NodeId};

/// Placeholder shown for parts without a name
pub const UNNAMED: &str = "(Unnamed)";

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub part: NodeId,
    pub name: String,
    pub metadata_text: String,
    pub distance: f32,
}

impl fmt::Display for DisplayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}\nMetadata: {}", self.name, self.metadata_text)
    }
}

/// Pretty JSON with two-space indent and keys sorted at every level
pub fn format_metadata(metadata: &Metadata) -> String {
    if metadata.is_empty() {
        return "{}".to_string();
    }
    match serde_json::to_string_pretty(&sorted(Value::Object(metadata.clone()))) {
        Ok(text) => text,
        Err(e) => {
            warn!("could not format metadata: {}", e);
            "{}".to_string()
        }
    }
}

// `preserve_order` would keep insertion order, so sort explicitly
fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sorted(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

pub fn display_name(name: &str) -> &str {
    if name.is_empty() {
        UNNAMED
    } else {
        name
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InspectionPresenter;

impl InspectionPresenter {
    pub fn new() -> Self {
        Self
    }

    /// `None` for a miss, or for a part that is no longer in `hierarchy`
    pub fn describe(&self, pick: &PickResult, hierarchy: &Hierarchy) -> Option<DisplayRecord> {
        let hit = pick.as_ref()?;
        let node = hierarchy.node(hit.part)?;
        Some(DisplayRecord {
            part: hit.part,
            name: display_name(&node.name).to_string(),
            metadata_text: format_metadata(&node.metadata),
            distance: hit.distance,
        })
    }
}

/// Last shown record. A miss leaves the panel as it was.
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    current: Option<DisplayRecord>,
}

impl InfoPanel {
    pub fn show(&mut self, record: Option<DisplayRecord>) {
        if let Some(record) = record {
            self.current = Some(record);
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&DisplayRecord> {
        self.current.as_ref()
    }
}
