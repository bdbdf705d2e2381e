use crate::dbc::core::{Outcome, lexer::Cursor, val_table_::decode_entries};
use crate::dbc::types::{
    database::Database,
    errors::{ParseError, ParseErrorKind},
    value_table::ValueTable,
};

/// Parse a VAL_ line that defines the value descriptions of a specific signal:
/// `VAL_ <MessageID> <SignalName> <value> "<desc>" ... ;`
///
/// The environment-variable form `VAL_ <EnvVar> <value> "<desc>" ... ;` is
/// recognized and left to the caller to keep verbatim.
pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    cur.word("VAL_")?;
    let first: String = cur.word("message id or environment variable")?;
    let Ok(message_id) = first.parse::<u32>() else {
        return Ok(Outcome::Opaque);
    };
    let signal_name: String = cur.word("signal name")?;
    let entries = decode_entries(cur)?;

    let msg = db.get_message_by_id_mut(message_id).ok_or_else(|| {
        cur.error_for(&first, ParseErrorKind::UnresolvedReference { object: "message" })
    })?;
    let sig = msg.get_signal_by_name_mut(&signal_name).ok_or_else(|| {
        cur.error_for(&signal_name, ParseErrorKind::UnresolvedReference { object: "signal" })
    })?;

    let mut table: ValueTable = ValueTable::new("");
    table.entries = entries;
    sig.value_table = Some(table);
    Ok(Outcome::Applied)
}
