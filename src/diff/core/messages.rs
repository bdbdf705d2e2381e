use crate::dbc::types::{attributes::AttrObject, database::Database, message::Message};
use crate::diff::core::{
    fields::Deltas,
    join::{Joined, join},
    signals::diff_signals,
};
use crate::diff::options::DiffOptions;
use crate::diff::types::{
    change::{ChangeStatus, MessageChange},
    delta::{Field, FieldValue},
};

use log::trace;
use std::collections::BTreeSet;

/// Messages of both databases joined by ID, ascending.
pub(crate) fn diff_messages(old: &Database, new: &Database, options: &DiffOptions) -> Vec<MessageChange> {
    let joined = join(
        old.iter_messages().map(|m| (m.id, m)),
        new.iter_messages().map(|m| (m.id, m)),
    );

    let mut out: Vec<MessageChange> = Vec::with_capacity(joined.len());
    for (id, pair) in joined {
        let change: MessageChange = match pair {
            Joined::OnlyOld(m) => MessageChange {
                id,
                status: ChangeStatus::Removed,
                old_name: Some(m.name.clone()),
                new_name: None,
                deltas: Vec::new(),
                signals: Vec::new(),
            },
            Joined::OnlyNew(m) => MessageChange {
                id,
                status: ChangeStatus::Added,
                old_name: None,
                new_name: Some(m.name.clone()),
                deltas: Vec::new(),
                signals: Vec::new(),
            },
            Joined::Both(o, n) => compare_message(old, o, new, n, options),
        };
        trace!("message {} ({}): {}", change.id, change.name(), change.status);
        if change.status.is_change() || options.include_unchanged {
            out.push(change);
        }
    }
    out
}

fn compare_message(
    old_db: &Database,
    old: &Message,
    new_db: &Database,
    new: &Message,
    options: &DiffOptions,
) -> MessageChange {
    let mut d = Deltas::new(options);
    d.text(Field::Name, &old.name, &new.name);
    d.value(Field::ByteLength, old.byte_length, new.byte_length, |v| FieldValue::Integer(v.into()));
    d.optional_text(Field::Sender, old.sender.as_deref(), new.sender.as_deref());
    d.names(Field::Transmitters, name_set(&old.transmitters), name_set(&new.transmitters));
    d.optional_text(Field::Comment, old.comment.as_deref(), new.comment.as_deref());
    d.attributes(
        &old_db.effective_attributes(AttrObject::Message, &old.attributes),
        &new_db.effective_attributes(AttrObject::Message, &new.attributes),
    );
    let deltas = d.finish();

    let mut signals = diff_signals(old_db, old, new_db, new, options);
    let changed: bool = !deltas.is_empty() || signals.iter().any(|s| s.status.is_change());
    if !options.include_unchanged {
        signals.retain(|s| s.status.is_change());
    }

    MessageChange {
        id: old.id,
        status: ChangeStatus::from_deltas(changed),
        old_name: Some(old.name.clone()),
        new_name: Some(new.name.clone()),
        deltas,
        signals,
    }
}

fn name_set(names: &[String]) -> BTreeSet<&str> {
    names.iter().map(String::as_str).collect()
}
