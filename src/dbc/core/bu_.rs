use crate::dbc::core::lexer::Cursor;
use crate::dbc::types::{database::Database, errors::ParseError};

/// Decode the BU_ line listing node names and register them in the database.
/// Example: `BU_: ECU1 ECU2 ECU3`
pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<(), ParseError> {
    cur.word("BU_")?;
    cur.punct(':', "':' after BU_")?;

    while !cur.at_end() {
        // some tools separate node names with commas
        if cur.eat_punct(',') {
            continue;
        }
        let name: String = cur.word("node name")?;
        // creates if missing, returns existing key otherwise
        db.add_node_if_absent(&name);
    }
    cur.finish()
}
