use crate::dbc::types::{attributes::AttrObject, database::Database};
use crate::diff::core::{
    fields::Deltas,
    join::{Joined, join},
};
use crate::diff::options::DiffOptions;
use crate::diff::types::{
    change::{ChangeStatus, NodeChange, ValueTableChange},
    delta::{Field, FieldDelta},
};

pub(crate) fn diff_version(old: &Database, new: &Database, options: &DiffOptions) -> Option<FieldDelta> {
    let mut d = Deltas::new(options);
    d.text(Field::Version, &old.version, &new.version);
    d.finish().pop()
}

/// Network comment and database attributes.
pub(crate) fn diff_attributes(old: &Database, new: &Database, options: &DiffOptions) -> Vec<FieldDelta> {
    let mut d = Deltas::new(options);
    d.optional_text(Field::Comment, old.comment.as_deref(), new.comment.as_deref());
    d.attributes(
        &old.effective_attributes(AttrObject::Database, &old.attributes),
        &new.effective_attributes(AttrObject::Database, &new.attributes),
    );
    d.finish()
}

pub(crate) fn diff_nodes(old: &Database, new: &Database, options: &DiffOptions) -> Vec<NodeChange> {
    let joined = join(
        old.iter_nodes().map(|n| (n.name.as_str(), n)),
        new.iter_nodes().map(|n| (n.name.as_str(), n)),
    );
    let mut out: Vec<NodeChange> = Vec::new();
    for (name, pair) in joined {
        let (status, deltas) = match pair {
            Joined::OnlyOld(_) => (ChangeStatus::Removed, Vec::new()),
            Joined::OnlyNew(_) => (ChangeStatus::Added, Vec::new()),
            Joined::Both(o, n) => {
                let mut d = Deltas::new(options);
                d.optional_text(Field::Comment, o.comment.as_deref(), n.comment.as_deref());
                d.attributes(
                    &old.effective_attributes(AttrObject::Node, &o.attributes),
                    &new.effective_attributes(AttrObject::Node, &n.attributes),
                );
                let deltas = d.finish();
                (ChangeStatus::from_deltas(!deltas.is_empty()), deltas)
            }
        };
        if status.is_change() || options.include_unchanged {
            out.push(NodeChange {
                name: name.to_string(),
                status,
                deltas,
            });
        }
    }
    out
}

pub(crate) fn diff_value_tables(old: &Database, new: &Database, options: &DiffOptions) -> Vec<ValueTableChange> {
    let joined = join(
        old.value_tables.iter().map(|(k, t)| (k.as_str(), t)),
        new.value_tables.iter().map(|(k, t)| (k.as_str(), t)),
    );
    let mut out: Vec<ValueTableChange> = Vec::new();
    for (name, pair) in joined {
        let (status, deltas) = match pair {
            Joined::OnlyOld(_) => (ChangeStatus::Removed, Vec::new()),
            Joined::OnlyNew(_) => (ChangeStatus::Added, Vec::new()),
            Joined::Both(o, n) => {
                let mut d = Deltas::new(options);
                d.table(Field::Entries, Some(o), Some(n));
                let deltas = d.finish();
                (ChangeStatus::from_deltas(!deltas.is_empty()), deltas)
            }
        };
        if status.is_change() || options.include_unchanged {
            out.push(ValueTableChange {
                name: name.to_string(),
                status,
                deltas,
            });
        }
    }
    out
}
