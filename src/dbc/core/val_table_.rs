use crate::dbc::core::lexer::Cursor;
use crate::dbc::types::{database::Database, errors::ParseError, value_table::ValueTable};

use std::collections::BTreeMap;

/// Reads `<value> "<desc>"` pairs up to the end of the record.
pub(crate) fn decode_entries(cur: &mut Cursor) -> Result<BTreeMap<i64, String>, ParseError> {
    let mut entries: BTreeMap<i64, String> = BTreeMap::new();
    while !cur.at_end() {
        let raw: i64 = cur.integer("raw value")?;
        let desc: String = cur.quoted("quoted value description")?;
        entries.insert(raw, desc);
    }
    cur.finish()?;
    Ok(entries)
}

/// Decode a named value table.
/// Example: `VAL_TABLE_ OnOff 1 "On" 0 "Off" ;`
pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<(), ParseError> {
    cur.word("VAL_TABLE_")?;
    let name: String = cur.word("value table name")?;
    let mut table: ValueTable = ValueTable::new(&name);
    table.entries = decode_entries(cur)?;
    db.value_tables.insert(name, table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::core::cursor;

    #[test]
    fn test_decode() {
        let mut db = Database::default();
        decode(
            &mut db,
            &mut cursor(r#"VAL_TABLE_ GearState 0 "Park" 1 "Reverse" -1 "Invalid gear" ;"#),
        )
        .unwrap();
        let t = &db.value_tables["GearState"];
        assert_eq!(t.name, "GearState");
        assert_eq!(t.get(1), Some("Reverse"));
        assert_eq!(t.get(-1), Some("Invalid gear"));
        let keys: Vec<i64> = t.entries.keys().copied().collect();
        assert_eq!(keys, [-1, 0, 1]);
    }

    #[test]
    fn dangling_value_fails() {
        let mut db = Database::default();
        assert!(decode(&mut db, &mut cursor(r#"VAL_TABLE_ T 0 "Off" 1 ;"#)).is_err());
    }
}
