use crate::dbc::core::{Outcome, lexer::Cursor};
use crate::dbc::types::{
    database::Database,
    errors::{ParseError, ParseErrorKind},
};

pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    // Expected format:
    // CM_ SG_ <MessageID> <SignalName> "Comment...";
    cur.word("SG_")?;
    let id_token: String = cur.word("message id")?;
    let id: u32 = id_token
        .parse()
        .map_err(|_| cur.error_for(&id_token, ParseErrorKind::MalformedNumber))?;
    let signal_name: String = cur.word("signal name")?;
    let text: String = cur.quoted("quoted comment")?;
    cur.finish()?;

    let msg = db
        .get_message_by_id_mut(id)
        .ok_or_else(|| cur.error_for(&id_token, ParseErrorKind::UnresolvedReference { object: "message" }))?;
    let sig = msg
        .get_signal_by_name_mut(&signal_name)
        .ok_or_else(|| cur.error_for(&signal_name, ParseErrorKind::UnresolvedReference { object: "signal" }))?;
    sig.comment = Some(text);
    Ok(Outcome::Applied)
}
