//! # dbc
//!
//! `dbc` is the module to work with .dbc files: it turns file content into an
//! immutable [`Database`](types::database::Database).
//!
//! ```
//! let db = dbc_diff::dbc::from_str(r#"
//! BU_: Engine
//! BO_ 256 EngineData: 8 Engine
//!  SG_ RPM : 0|16@1+ (0.25,0) [0|16383.75] "rpm" Vector__XXX
//! "#).expect("valid DBC");
//! assert_eq!(db.get_message_by_id(256).unwrap().signals[0].factor, 0.25);
//! ```

pub(crate) mod core;
pub mod parse;
pub mod types;

pub use parse::{from_bytes, from_file, from_str, from_str_named};
