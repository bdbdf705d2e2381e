pub(crate) mod database;
pub(crate) mod fields;
pub(crate) mod join;
pub(crate) mod messages;
pub(crate) mod signals;

#[cfg(test)]
pub(crate) fn parse(text: &str) -> crate::dbc::types::database::Database {
    crate::dbc::from_str(text).expect("test database must parse")
}
