//! Record-level decoders, one module per DBC keyword.

pub(crate) mod lexer;
pub(crate) mod numbers;
pub(crate) mod records;
pub(crate) mod strings;

pub(crate) mod attributes;
pub(crate) mod comments;

pub(crate) mod bo_;
pub(crate) mod bo_tx_bu_;
pub(crate) mod bu_;
pub(crate) mod sg_;
pub(crate) mod sig_valtype_;
pub(crate) mod val_;
pub(crate) mod val_table_;
pub(crate) mod version;

/// Whether an annotation record was folded into the model or has to be kept verbatim.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Applied,
    /// Environment-variable and other unmodelled targets.
    Opaque,
}

#[cfg(test)]
pub(crate) fn cursor(text: &str) -> lexer::Cursor<'static> {
    let record = records::split(text)
        .into_iter()
        .next()
        .expect("test input holds a record");
    lexer::Cursor::new("test.dbc", &record).expect("test input tokenizes")
}
