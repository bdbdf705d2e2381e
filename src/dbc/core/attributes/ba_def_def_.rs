use crate::dbc::core::{
    Outcome,
    attributes::decode_value,
    lexer::{Cursor, Token, tokenize},
};
use crate::dbc::types::{
    attributes::{AttrObject, AttributeValue},
    database::Database,
    errors::{ParseError, ParseErrorKind},
};

pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    // Expected formats:
    // BA_DEF_DEF_  "DBName" "";
    // BA_DEF_DEF_  "GenMsgDelayTime" 0;
    // BA_DEF_DEF_  "GenMsgSendType" "Cyclic";
    cur.word("BA_DEF_DEF_")?;
    let name: String = cur.quoted("quoted attribute name")?;
    let raw: AttributeValue = decode_value(cur)?;
    cur.finish()?;

    // the record does not say which object kind it targets: apply it to every definition with that name
    let mut applied: bool = false;
    for object in [
        AttrObject::Database,
        AttrObject::Node,
        AttrObject::Message,
        AttrObject::Signal,
    ] {
        if let Some(def) = db.attr_defs_mut(object).and_then(|defs| defs.get_mut(&name)) {
            def.default = Some(def.coerce(raw.clone()));
            applied = true;
        }
    }

    if applied {
        return Ok(Outcome::Applied);
    }
    if is_environment_definition(db, &name) {
        return Ok(Outcome::Opaque);
    }
    Err(cur.error_for(
        &name,
        ParseErrorKind::UnresolvedReference {
            object: "attribute definition",
        },
    ))
}

/// True when `name` was defined by a `BA_DEF_ EV_` record, which is kept verbatim.
fn is_environment_definition(db: &Database, name: &str) -> bool {
    db.raw_records
        .iter()
        .filter(|r| r.keyword == "BA_DEF_")
        .any(|r| {
            matches!(
                tokenize(&r.text).as_deref(),
                Ok([Token::Word(_), Token::Word(object), Token::Quoted(n), ..]) if object == "EV_" && n == name
            )
        })
}
