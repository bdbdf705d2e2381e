use crate::dbc::core::lexer::Cursor;
use crate::dbc::types::{
    database::Database,
    errors::{ParseError, ParseErrorKind},
    signal::Signedness,
};

/// Decodes a `SIG_VALTYPE_` line assigning floating-point encodings to a signal.
///
/// Shape: `SIG_VALTYPE_ <MsgID> <SignalName> : <Value>;`
/// where `<Value>` is `0` (integer, sign kept), `1` (IEEE float, 32-bit) or `2` (IEEE double, 64-bit).
pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<(), ParseError> {
    cur.word("SIG_VALTYPE_")?;
    let id_token: String = cur.word("message id")?;
    let id: u32 = id_token
        .parse()
        .map_err(|_| cur.error_for(&id_token, ParseErrorKind::MalformedNumber))?;
    let signal_name: String = cur.word("signal name")?;
    // the colon is missing in some exports
    cur.eat_punct(':');
    let value: u8 = cur.integer("value type (0, 1 or 2)")?;
    if value > 2 {
        return Err(cur.error_at_previous(ParseErrorKind::UnexpectedToken {
            expected: "value type (0, 1 or 2)",
        }));
    }
    cur.finish()?;

    let msg = db
        .get_message_by_id_mut(id)
        .ok_or_else(|| cur.error_for(&id_token, ParseErrorKind::UnresolvedReference { object: "message" }))?;
    let sig = msg
        .get_signal_by_name_mut(&signal_name)
        .ok_or_else(|| cur.error_for(&signal_name, ParseErrorKind::UnresolvedReference { object: "signal" }))?;

    match value {
        1 => sig.sign = Signedness::IeeeFloat,
        2 => sig.sign = Signedness::IeeeDouble,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::core::cursor;
    use crate::dbc::types::{message::Message, signal::Signal};

    #[test]
    fn test_decode() {
        let mut db = Database::default();
        let mut msg = Message::new(100, "Floats", 8);
        msg.signals.push(Signal::new("Temp"));
        msg.signals.push(Signal::new("Pressure"));
        db.push_message(msg);

        decode(&mut db, &mut cursor("SIG_VALTYPE_ 100 Temp : 1;")).unwrap();
        decode(&mut db, &mut cursor("SIG_VALTYPE_ 100 Pressure : 2;")).unwrap();
        let msg = db.get_message_by_id(100).unwrap();
        assert_eq!(msg.get_signal_by_name("Temp").unwrap().sign, Signedness::IeeeFloat);
        assert_eq!(msg.get_signal_by_name("Pressure").unwrap().sign, Signedness::IeeeDouble);

        assert!(decode(&mut db, &mut cursor("SIG_VALTYPE_ 100 Temp : 3;")).is_err());
    }
}
