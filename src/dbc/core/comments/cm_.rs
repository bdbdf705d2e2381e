use crate::dbc::core::{Outcome, lexer::Cursor};
use crate::dbc::types::{database::Database, errors::ParseError};

pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    // Expected formats:
    // CM_ "Comment regarding the network";
    let text: String = cur.quoted("quoted comment")?;
    cur.finish()?;
    db.comment = Some(text);
    Ok(Outcome::Applied)
}
