use crate::dbc::core::lexer::Cursor;
use crate::dbc::types::{database::Database, errors::ParseError};

/// Decode the `VERSION` line.
/// Example: `VERSION "1.0"`
pub(crate) fn decode(db: &mut Database, cur: &mut Cursor) -> Result<(), ParseError> {
    cur.word("VERSION")?;
    db.version = cur.quoted("quoted version string")?;
    cur.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::core::cursor;

    #[test]
    fn test_decode() {
        let mut db: Database = Database::default();
        decode(&mut db, &mut cursor(r#"VERSION "1.0.2""#)).unwrap();
        assert_eq!(db.version, "1.0.2");
    }

    #[test]
    fn empty_version_is_allowed() {
        let mut db: Database = Database::default();
        decode(&mut db, &mut cursor(r#"VERSION """#)).unwrap();
        assert_eq!(db.version, "");
    }

    #[test]
    fn unquoted_version_fails() {
        let mut db: Database = Database::default();
        assert!(decode(&mut db, &mut cursor("VERSION 1.0")).is_err());
    }
}
