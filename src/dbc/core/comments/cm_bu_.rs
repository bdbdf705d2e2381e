use crate::dbc::core::{Outcome, lexer::Cursor};
use crate::dbc::types::{
    database::Database,
    errors::{ParseError, ParseErrorKind},
};

pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<Outcome, ParseError> {
    // Expected format:
    // CM_ BU_ <NodeName> "Comment...";
    cur.word("BU_")?;
    let name: String = cur.word("node name")?;
    let text: String = cur.quoted("quoted comment")?;
    cur.finish()?;

    let node = db
        .get_node_by_name_mut(&name)
        .ok_or_else(|| cur.error_for(&name, ParseErrorKind::UnresolvedReference { object: "node" }))?;
    node.comment = Some(text);
    Ok(Outcome::Applied)
}
