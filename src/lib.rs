//! # dbc_diff
//!
//! Rust utilities for comparing **automotive CAN** databases.
//!
//! ## Highlights
//! - **DBC parser**: load CAN databases from `.dbc` into a SlotMap-backed [`Database`].
//! - **Structural diff**: match messages by ID and signals by name, classify them as
//!   added / removed / modified / unchanged with field-level deltas ([`ChangeSet`]).
//! - **File pairs**: parse and diff resolved (old, new) file pairs in parallel, one
//!   failing pair never stopping the others ([`compare::compare_pairs`]).
//! - **Serializable output**: every change-set type implements `serde::Serialize`.
//!
//! The crate logs through the [`log`] facade and never installs a logger.

#[cfg(feature = "diff")]
pub mod compare;
#[cfg(feature = "dbc")]
pub mod dbc;
#[cfg(feature = "diff")]
pub mod diff;

// Top-level re-exports (appear under Crate Items → Structs)
#[cfg(feature = "dbc")]
#[doc(inline)]
pub use crate::dbc::types::{
    attributes::{AttrObject, AttrType, AttributeDefinition, AttributeValue},
    database::{Database, MessageKey, NodeKey, RawRecord},
    errors::{DbcError, InputError, InvariantError, ParseError, ParseErrorKind},
    message::{IdFormat, Message},
    node::Node,
    signal::{ByteOrder, Multiplexer, Receivers, Signal, Signedness},
    value_table::ValueTable,
};

#[cfg(feature = "diff")]
#[doc(inline)]
pub use crate::diff::{ChangeSet, ChangeStatus, DiffOptions, FieldDelta, diff};
