//! # diff
//!
//! Structural comparison of two parsed [`Database`](crate::dbc::types::database::Database)s.
//!
//! Messages are matched by ID and signals by name inside a matched message.
//! Each entity is classified as added, removed, modified or unchanged, and
//! modified entities carry one [`FieldDelta`] per differing field.
//!
//! ```
//! use dbc_diff::diff::{ChangeStatus, DiffOptions, diff};
//!
//! let old = dbc_diff::dbc::from_str(r#"
//! BU_: ECU
//! BO_ 256 EngineData: 8 ECU
//!  SG_ RPM : 0|16@1+ (0.25,0) [0|16383.75] "rpm" Vector__XXX
//! "#).unwrap();
//! let new = dbc_diff::dbc::from_str(r#"
//! BU_: ECU
//! BO_ 256 EngineData: 8 ECU
//!  SG_ RPM : 0|16@1+ (0.5,0) [0|16383.75] "rpm" Vector__XXX
//! "#).unwrap();
//!
//! let changes = diff(&old, &new, &DiffOptions::default()).unwrap();
//! let rpm = changes.message(256).and_then(|m| m.signal("RPM")).unwrap();
//! assert_eq!(rpm.status, ChangeStatus::Modified);
//! assert_eq!(rpm.deltas.len(), 1);
//! ```

pub(crate) mod core;
pub mod engine;
pub mod options;
pub mod types;

pub use engine::diff;
pub use options::DiffOptions;
pub use types::{
    change::{ChangeSet, ChangeStatus, MessageChange, NodeChange, SignalChange, StatusCounts, Summary, ValueTableChange},
    delta::{Field, FieldDelta, FieldValue},
};
