use crate::dbc::core::lexer::Cursor;
use crate::dbc::types::{
    database::Database,
    errors::{ParseError, ParseErrorKind},
};

/// Parse `BO_TX_BU_` lines assigning transmit-capable nodes to a message.
/// Example: `BO_TX_BU_ 123 : NodeA,NodeB;`
pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<(), ParseError> {
    cur.word("BO_TX_BU_")?;
    let id_token: String = cur.word("message id")?;
    let id: u32 = id_token
        .parse()
        .map_err(|_| cur.error_for(&id_token, ParseErrorKind::MalformedNumber))?;
    cur.punct(':', "':' after message id")?;

    let mut nodes: Vec<String> = Vec::new();
    while !cur.at_end() {
        if cur.eat_punct(',') {
            continue;
        }
        nodes.push(cur.word("transmitter node")?);
    }
    cur.finish()?;

    let msg = db
        .get_message_by_id_mut(id)
        .ok_or_else(|| cur.error_for(&id_token, ParseErrorKind::UnresolvedReference { object: "message" }))?;
    for node in nodes {
        if !msg.transmitters.contains(&node) {
            msg.transmitters.push(node);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::core::cursor;
    use crate::dbc::types::message::Message;

    #[test]
    fn test_decode() {
        let mut db = Database::default();
        db.push_message(Message::new(2527679645, "Motor_01", 8));
        decode(&mut db, &mut cursor("BO_TX_BU_ 2527679645 : Backup_Motor,Motor;")).unwrap();
        decode(&mut db, &mut cursor("BO_TX_BU_ 2527679645 : Motor Spare;")).unwrap();
        let msg = db.get_message_by_id(2527679645).unwrap();
        assert_eq!(msg.transmitters, ["Backup_Motor", "Motor", "Spare"]);
    }

    #[test]
    fn unknown_message_is_unresolved() {
        let mut db = Database::default();
        let err = decode(&mut db, &mut cursor("BO_TX_BU_ 5 : A;")).unwrap_err();
        assert_eq!(err.token, "5");
        assert_eq!(err.reason, ParseErrorKind::UnresolvedReference { object: "message" });
    }
}
