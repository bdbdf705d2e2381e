use crate::diff::types::delta::FieldDelta;

use serde::Serialize;
use std::fmt;

/// Classification of an entity across the two databases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Added,
    Removed,
    Modified,
    #[default]
    Unchanged,
}

impl ChangeStatus {
    /// Status of an entity present on both sides.
    pub(crate) fn from_deltas(changed: bool) -> Self {
        if changed {
            ChangeStatus::Modified
        } else {
            ChangeStatus::Unchanged
        }
    }

    pub fn is_change(&self) -> bool {
        *self != ChangeStatus::Unchanged
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Removed => "removed",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Unchanged => "unchanged",
        };
        f.write_str(s)
    }
}

/// Result of comparing two databases.
///
/// Messages are ordered by ascending ID, signals by ascending name, nodes and
/// value tables by name. Unchanged entries are present only when the diff was
/// run with `include_unchanged`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    /// `VERSION` string delta.
    pub version: Option<FieldDelta>,
    pub nodes: Vec<NodeChange>,
    /// Named `VAL_TABLE_` tables.
    pub value_tables: Vec<ValueTableChange>,
    /// Database-level deltas: network comment and database attributes.
    pub attributes: Vec<FieldDelta>,
    pub messages: Vec<MessageChange>,
}

/// One message, matched by ID.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageChange {
    /// Raw ID as written in the file (bit 31 = extended frame).
    pub id: u32,
    pub status: ChangeStatus,
    /// Name in the old database, `None` when added.
    pub old_name: Option<String>,
    /// Name in the new database, `None` when removed.
    pub new_name: Option<String>,
    /// Message-level field deltas (empty for added/removed messages).
    pub deltas: Vec<FieldDelta>,
    /// Signal changes, by ascending name (empty for added/removed messages).
    pub signals: Vec<SignalChange>,
}

impl MessageChange {
    /// Current name: the new one, or the old one for removed messages.
    pub fn name(&self) -> &str {
        self.new_name
            .as_deref()
            .or(self.old_name.as_deref())
            .unwrap_or_default()
    }

    pub fn signal(&self, name: &str) -> Option<&SignalChange> {
        self.signals.iter().find(|s| s.name == name)
    }
}

/// One signal inside a matched message, matched by name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignalChange {
    pub name: String,
    pub status: ChangeStatus,
    /// Field deltas (empty unless modified).
    pub deltas: Vec<FieldDelta>,
}

/// One node (`BU_`), matched by name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeChange {
    pub name: String,
    pub status: ChangeStatus,
    /// Comment and attribute deltas (empty unless modified).
    pub deltas: Vec<FieldDelta>,
}

/// One named value table, matched by name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueTableChange {
    pub name: String,
    pub status: ChangeStatus,
    pub deltas: Vec<FieldDelta>,
}

/// Per-status counters for messages and signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl StatusCounts {
    fn count(&mut self, status: ChangeStatus) {
        match status {
            ChangeStatus::Added => self.added += 1,
            ChangeStatus::Removed => self.removed += 1,
            ChangeStatus::Modified => self.modified += 1,
            ChangeStatus::Unchanged => self.unchanged += 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub messages: StatusCounts,
    pub signals: StatusCounts,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "messages: +{} -{} ~{}, signals: +{} -{} ~{}",
            self.messages.added,
            self.messages.removed,
            self.messages.modified,
            self.signals.added,
            self.signals.removed,
            self.signals.modified
        )
    }
}

impl ChangeSet {
    /// True when nothing was reported: no deltas and no entries of any status.
    pub fn is_empty(&self) -> bool {
        self.version.is_none()
            && self.nodes.is_empty()
            && self.value_tables.is_empty()
            && self.attributes.is_empty()
            && self.messages.is_empty()
    }

    /// True when at least one entity was added, removed or modified.
    pub fn has_changes(&self) -> bool {
        self.version.is_some()
            || !self.attributes.is_empty()
            || self.nodes.iter().any(|n| n.status.is_change())
            || self.value_tables.iter().any(|t| t.status.is_change())
            || self.messages.iter().any(|m| m.status.is_change())
    }

    pub fn message(&self, id: u32) -> Option<&MessageChange> {
        self.messages
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|i| &self.messages[i])
    }

    /// Counts the reported messages and signals per status.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for msg in &self.messages {
            summary.messages.count(msg.status);
            for sig in &msg.signals {
                summary.signals.count(sig.status);
            }
        }
        summary
    }
}
