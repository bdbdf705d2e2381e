use std::io;
use thiserror::Error;

/// A malformed or structurally invalid record in a `.dbc` file.
///
/// `origin` identifies the input (file path or a caller supplied label),
/// `line` is the 1-based line of the first line of the offending record.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{origin}:{line}: {reason} (near `{token}`)")]
pub struct ParseError {
    pub origin: String,
    pub line: usize,
    pub token: String,
    pub reason: ParseErrorKind,
}

/// Why a record could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}")]
    UnexpectedToken { expected: &'static str },
    #[error("record ended early, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("unknown {context} object keyword")]
    UnknownKeyword { context: &'static str },
    #[error("signal record is not grouped under a message")]
    SignalOutsideMessage,
    #[error("multiplexed signal '{signal}' has no multiplexor in message {message_id}")]
    UnknownMultiplexer { message_id: u32, signal: String },
    #[error("message ID {id} is already defined at line {first_line}")]
    DuplicateMessageId { id: u32, first_line: usize },
    #[error("signal '{signal}' is already defined in message {message_id}")]
    DuplicateSignal { message_id: u32, signal: String },
    #[error("malformed numeric literal")]
    MalformedNumber,
    #[error("unterminated quoted string")]
    UnterminatedString,
    #[error("reference to undefined {object}")]
    UnresolvedReference { object: &'static str },
}

/// A database that is valid per grammar but breaks a uniqueness invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("message ID {id} (0x{id:X}) is shared by '{first}' and '{second}'")]
    DuplicateMessageId {
        id: u32,
        first: String,
        second: String,
    },
    #[error("signal '{signal}' appears more than once in message {message_id} (0x{message_id:X})")]
    DuplicateSignalName { message_id: u32, signal: String },
}

/// Errors produced while reading a `.dbc` file from disk.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Any failure of [`crate::dbc::from_file`].
#[derive(Debug, Error)]
pub enum DbcError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
