//! Attribute records: `BA_DEF_`, `BA_DEF_DEF_` and `BA_`.

pub(crate) mod ba_;
pub(crate) mod ba_def_;
pub(crate) mod ba_def_def_;

use crate::dbc::core::{
    lexer::{Cursor, Token},
    numbers,
};
use crate::dbc::types::{
    attributes::{AttrObject, AttributeValue},
    errors::{ParseError, ParseErrorKind},
};

/// Consumes an optional object keyword (`BU_`, `BO_`, `SG_`, `EV_`).
/// Anything else means a database-level attribute.
pub(crate) fn object_keyword(cur: &mut Cursor) -> AttrObject {
    let object: AttrObject = match cur.peek_word() {
        Some("BU_") => AttrObject::Node,
        Some("BO_") => AttrObject::Message,
        Some("SG_") => AttrObject::Signal,
        Some("EV_") => AttrObject::EnvironmentVariable,
        _ => return AttrObject::Database,
    };
    cur.bump();
    object
}

/// Reads a raw attribute value: a quoted string, an integer or a decimal literal.
pub(crate) fn decode_value(cur: &mut Cursor) -> Result<AttributeValue, ParseError> {
    match cur.bump() {
        Some(Token::Quoted(s)) => Ok(AttributeValue::Str(s)),
        Some(Token::Word(w)) => {
            if let Ok(i) = w.parse::<i64>() {
                Ok(AttributeValue::Int(i))
            } else if let Some(f) = numbers::parse_f64(&w) {
                Ok(AttributeValue::Float(f))
            } else {
                Err(cur.error_at_previous(ParseErrorKind::MalformedNumber))
            }
        }
        Some(Token::Punct(_)) => Err(cur.error_at_previous(ParseErrorKind::UnexpectedToken {
            expected: "attribute value",
        })),
        None => Err(cur.error(ParseErrorKind::UnexpectedEnd {
            expected: "attribute value",
        })),
    }
}
