use crate::dbc::core::{
    Outcome,
    attributes::{decode_value, object_keyword},
    lexer::Cursor,
};
use crate::dbc::types::{
    attributes::{AttrObject, AttributeValue},
    database::Database,
    errors::{ParseError, ParseErrorKind},
};

use log::warn;
use std::collections::BTreeMap;

pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    // Expected formats:
    // BA_ "BusType" "CAN FD";
    // BA_ "NmhNodeId" BU_ Motor 12;
    // BA_ "GenMsgCycleTime" BO_ 2527679645 100;
    // BA_ "GenSigStartValue" SG_ 2527679645 Engine_Speed 0;
    // BA_ "EvAttr" EV_ Klemme 1;
    cur.word("BA_")?;
    let name: String = cur.quoted("quoted attribute name")?;
    let object: AttrObject = object_keyword(cur);

    let target: Target = match object {
        AttrObject::Database => Target::Database,
        AttrObject::Node => Target::Node(cur.word("node name")?),
        AttrObject::Message => Target::Message(message_id(cur)?),
        AttrObject::Signal => {
            let id = message_id(cur)?;
            Target::Signal(id, cur.word("signal name")?)
        }
        AttrObject::EnvironmentVariable => {
            cur.word("environment variable name")?;
            Target::Opaque
        }
    };
    let raw: AttributeValue = decode_value(cur)?;
    cur.finish()?;

    let value: AttributeValue = match db.attr_def(object, &name) {
        Some(def) => def.coerce(raw),
        None => {
            if target != Target::Opaque {
                warn!(
                    "line {}: attribute \"{}\" assigned without a {} definition",
                    cur.line(),
                    name,
                    object
                );
            }
            raw
        }
    };

    let attributes: &mut BTreeMap<String, AttributeValue> = match &target {
        Target::Opaque => return Ok(Outcome::Opaque),
        Target::Database => &mut db.attributes,
        Target::Node(node) => {
            &mut db
                .get_node_by_name_mut(node)
                .ok_or_else(|| cur.error_for(node, ParseErrorKind::UnresolvedReference { object: "node" }))?
                .attributes
        }
        Target::Message((id, token)) => {
            &mut db
                .get_message_by_id_mut(*id)
                .ok_or_else(|| cur.error_for(token, ParseErrorKind::UnresolvedReference { object: "message" }))?
                .attributes
        }
        Target::Signal((id, token), signal) => {
            &mut db
                .get_message_by_id_mut(*id)
                .ok_or_else(|| cur.error_for(token, ParseErrorKind::UnresolvedReference { object: "message" }))?
                .get_signal_by_name_mut(signal)
                .ok_or_else(|| cur.error_for(signal, ParseErrorKind::UnresolvedReference { object: "signal" }))?
                .attributes
        }
    };
    attributes.insert(name, value);
    Ok(Outcome::Applied)
}

/// Object an assignment refers to; message IDs keep their source token for error reporting.
#[derive(Debug, PartialEq)]
enum Target {
    Database,
    Node(String),
    Message((u32, String)),
    Signal((u32, String), String),
    Opaque,
}

fn message_id(cur: &mut Cursor) -> Result<(u32, String), ParseError> {
    let token: String = cur.word("message id")?;
    let id: u32 = token
        .parse()
        .map_err(|_| cur.error_for(&token, ParseErrorKind::MalformedNumber))?;
    Ok((id, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::core::{attributes::ba_def_, cursor};
    use crate::dbc::types::{message::Message, signal::Signal};

    fn db() -> Database {
        let mut db = Database::default();
        db.add_node_if_absent("Motor");
        let mut msg = Message::new(2527679645, "Motor_01", 8);
        msg.signals.push(Signal::new("Engine_Speed"));
        db.push_message(msg);
        ba_def_::decode(&mut db, &mut cursor(r#"BA_DEF_ BO_ "GenMsgSendType" ENUM "Cyclic","OnChange";"#)).unwrap();
        db
    }

    #[test]
    fn test_decode() {
        let mut db = db();
        for line in [
            r#"BA_ "BusType" "CAN FD";"#,
            r#"BA_ "Baudrate" 500000;"#,
            r#"BA_ "NmhNodeId" BU_ Motor 12;"#,
            r#"BA_ "GenMsgSendType" BO_ 2527679645 1;"#,
            r#"BA_ "GenSigStartValue" SG_ 2527679645 Engine_Speed 2.5;"#,
        ] {
            assert_eq!(decode(&mut db, &mut cursor(line)).unwrap(), Outcome::Applied);
        }

        assert_eq!(db.attributes["BusType"], AttributeValue::Str("CAN FD".into()));
        assert_eq!(db.attributes["Baudrate"], AttributeValue::Int(500000));
        assert_eq!(
            db.get_node_by_name("Motor").unwrap().attributes["NmhNodeId"],
            AttributeValue::Int(12)
        );
        let msg = db.get_message_by_id(2527679645).unwrap();
        assert_eq!(msg.attributes["GenMsgSendType"], AttributeValue::Enum("OnChange".into()));
        assert_eq!(
            msg.get_signal_by_name("Engine_Speed").unwrap().attributes["GenSigStartValue"],
            AttributeValue::Float(2.5)
        );
    }

    #[test]
    fn environment_assignment_is_opaque() {
        let mut db = db();
        let out = decode(&mut db, &mut cursor(r#"BA_ "EvAttr" EV_ Klemme 1;"#)).unwrap();
        assert_eq!(out, Outcome::Opaque);
    }

    #[test]
    fn unresolved_targets_fail() {
        let mut db = db();
        let err = decode(&mut db, &mut cursor(r#"BA_ "X" BO_ 42 1;"#)).unwrap_err();
        assert_eq!(err.token, "42");
        let err = decode(&mut db, &mut cursor(r#"BA_ "X" BU_ Nobody 1;"#)).unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::UnresolvedReference { object: "node" });
    }

    #[test]
    fn malformed_value_fails() {
        let mut db = db();
        let err = decode(&mut db, &mut cursor(r#"BA_ "X" 1.2.3;"#)).unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::MalformedNumber);
    }
}
