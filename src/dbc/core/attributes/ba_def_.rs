use crate::dbc::core::{Outcome, attributes::object_keyword, lexer::Cursor};
use crate::dbc::types::{
    attributes::{AttrObject, AttrType, AttributeDefinition},
    database::Database,
    errors::{ParseError, ParseErrorKind},
};

pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    // Expected formats:
    // BA_DEF_  "DBName" STRING;
    // BA_DEF_  "Baudrate" INT 1 1000000;
    // BA_DEF_ BO_ "GenMsgCycleTime" INT 0 65535;
    // BA_DEF_ BU_ "NmhBaseAddress" HEX 0 536870911;
    // BA_DEF_ SG_ "GenSigStartValue" FLOAT -3.4E+038 3.4E+038;
    // BA_DEF_ BO_ "GenMsgSendType" ENUM "Cyclic","OnChange";
    cur.word("BA_DEF_")?;
    let object: AttrObject = object_keyword(cur);
    let name: String = cur.quoted("quoted attribute name")?;
    let kind_token: String = cur.word("attribute type")?;

    let mut def: AttributeDefinition = AttributeDefinition {
        name: name.clone(),
        object,
        ..Default::default()
    };

    match kind_token.as_str() {
        "STRING" => def.kind = AttrType::String,
        "INT" => {
            def.kind = AttrType::Int;
            def.int_min = Some(cur.integer("INT minimum")?);
            def.int_max = Some(cur.integer("INT maximum")?);
        }
        "HEX" => {
            def.kind = AttrType::Hex;
            def.hex_min = Some(cur.integer("HEX minimum")?);
            def.hex_max = Some(cur.integer("HEX maximum")?);
        }
        "FLOAT" => {
            def.kind = AttrType::Float;
            def.float_min = Some(cur.number("FLOAT minimum")?);
            def.float_max = Some(cur.number("FLOAT maximum")?);
        }
        "ENUM" => {
            def.kind = AttrType::Enum;
            while !cur.at_end() {
                if cur.eat_punct(',') {
                    continue;
                }
                def.enum_values.push(cur.quoted("quoted enum label")?);
            }
        }
        _ => {
            return Err(cur.error_at_previous(ParseErrorKind::UnexpectedToken {
                expected: "attribute type (INT, HEX, FLOAT, STRING or ENUM)",
            }));
        }
    }
    cur.finish()?;

    match db.attr_defs_mut(object) {
        Some(defs) => {
            defs.insert(name, def);
            Ok(Outcome::Applied)
        }
        None => Ok(Outcome::Opaque),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::core::cursor;

    #[test]
    fn test_decode() {
        let mut db = Database::default();
        for line in [
            r#"BA_DEF_  "DBName" STRING;"#,
            r#"BA_DEF_ BO_ "GenMsgCycleTime" INT 0 65535;"#,
            r#"BA_DEF_ BU_ "NmhBaseAddress" HEX 0 536870911;"#,
            r#"BA_DEF_ SG_ "GenSigStartValue" FLOAT -3.4E+038 3.4E+038;"#,
            r#"BA_DEF_ BO_ "GenMsgSendType" ENUM "Cyclic","OnChange", "NoSendType";"#,
        ] {
            assert_eq!(decode(&mut db, &mut cursor(line)).unwrap(), Outcome::Applied);
        }

        assert_eq!(db.db_attr_defs["DBName"].kind, AttrType::String);
        let cycle = &db.msg_attr_defs["GenMsgCycleTime"];
        assert_eq!((cycle.int_min, cycle.int_max), (Some(0), Some(65535)));
        assert_eq!(db.node_attr_defs["NmhBaseAddress"].hex_max, Some(536870911));
        assert_eq!(db.sig_attr_defs["GenSigStartValue"].float_min, Some(-3.4e38));
        assert_eq!(
            db.msg_attr_defs["GenMsgSendType"].enum_values,
            ["Cyclic", "OnChange", "NoSendType"]
        );
    }

    #[test]
    fn environment_definitions_are_opaque() {
        let mut db = Database::default();
        let out = decode(&mut db, &mut cursor(r#"BA_DEF_ EV_ "EvAttr" STRING;"#)).unwrap();
        assert_eq!(out, Outcome::Opaque);
    }

    #[test]
    fn unknown_type_fails() {
        let mut db = Database::default();
        let err = decode(&mut db, &mut cursor(r#"BA_DEF_ "X" BOOL;"#)).unwrap_err();
        assert_eq!(err.token, "BOOL");
    }
}
