//! `CM_` records: network, node, message and signal comments.

pub(crate) mod cm_;
pub(crate) mod cm_bo_;
pub(crate) mod cm_bu_;
pub(crate) mod cm_sg_;

use crate::dbc::core::{Outcome, lexer::Cursor, lexer::Token};
use crate::dbc::types::{
    database::Database,
    errors::{ParseError, ParseErrorKind},
};

/// Dispatches a `CM_` record on its object keyword.
pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    cur.word("CM_")?;
    let next: Option<Token> = cur.peek().cloned();
    match next {
        Some(Token::Quoted(_)) => cm_::decode(db, cur),
        Some(Token::Word(w)) => match w.as_str() {
            "BU_" => cm_bu_::decode(db, cur),
            "BO_" => cm_bo_::decode(db, cur),
            "SG_" => cm_sg_::decode(db, cur),
            "EV_" => Ok(Outcome::Opaque),
            _ => Err(cur.error(ParseErrorKind::UnknownKeyword { context: "CM_" })),
        },
        _ => Err(cur.error(ParseErrorKind::UnexpectedToken {
            expected: "comment text or object keyword",
        })),
    }
}
