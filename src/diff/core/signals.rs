use crate::dbc::types::{
    attributes::AttrObject,
    database::Database,
    message::Message,
    signal::Signal,
};
use crate::diff::core::{
    fields::Deltas,
    join::{Joined, join},
};
use crate::diff::options::DiffOptions;
use crate::diff::types::{
    change::{ChangeStatus, SignalChange},
    delta::{Field, FieldDelta, FieldValue},
};

/// Signals of two matched messages, joined by name. Every signal is returned,
/// unchanged ones included; the caller filters.
pub(crate) fn diff_signals(
    old_db: &Database,
    old: &Message,
    new_db: &Database,
    new: &Message,
    options: &DiffOptions,
) -> Vec<SignalChange> {
    let joined = join(
        old.signals.iter().map(|s| (s.name.as_str(), s)),
        new.signals.iter().map(|s| (s.name.as_str(), s)),
    );

    joined
        .into_iter()
        .map(|(name, pair)| {
            let (status, deltas) = match pair {
                Joined::OnlyOld(_) => (ChangeStatus::Removed, Vec::new()),
                Joined::OnlyNew(_) => (ChangeStatus::Added, Vec::new()),
                Joined::Both(o, n) => {
                    let deltas = compare_signal(old_db, o, new_db, n, options);
                    (ChangeStatus::from_deltas(!deltas.is_empty()), deltas)
                }
            };
            SignalChange {
                name: name.to_string(),
                status,
                deltas,
            }
        })
        .collect()
}

fn compare_signal(
    old_db: &Database,
    old: &Signal,
    new_db: &Database,
    new: &Signal,
    options: &DiffOptions,
) -> Vec<FieldDelta> {
    let mut d = Deltas::new(options);
    d.value(Field::StartBit, old.bit_start, new.bit_start, |v| FieldValue::Integer(v.into()));
    d.value(Field::BitLength, old.bit_length, new.bit_length, |v| FieldValue::Integer(v.into()));
    d.value(Field::ByteOrder, old.byte_order, new.byte_order, FieldValue::ByteOrder);
    d.value(Field::Signedness, old.sign, new.sign, FieldValue::Signedness);
    d.float(Field::Factor, old.factor, new.factor);
    d.float(Field::Offset, old.offset, new.offset);
    d.float(Field::Minimum, old.min, new.min);
    d.float(Field::Maximum, old.max, new.max);
    d.text(Field::Unit, &old.unit, &new.unit);
    d.table(Field::ValueTable, old.value_table.as_ref(), new.value_table.as_ref());
    d.optional_text(Field::Comment, old.comment.as_deref(), new.comment.as_deref());
    d.names(Field::Receivers, old.receivers.as_set(), new.receivers.as_set());
    d.value(Field::Multiplexer, old.multiplexer, new.multiplexer, FieldValue::Multiplexer);
    d.attributes(
        &old_db.effective_attributes(AttrObject::Signal, &old.attributes),
        &new_db.effective_attributes(AttrObject::Signal, &new.attributes),
    );
    d.finish()
}
