//! # types
//!
//! The change set produced by [`crate::diff::diff`]. Every type is
//! `Serialize` so report renderers can emit it losslessly.

pub mod change;
pub mod delta;
