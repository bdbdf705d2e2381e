//! # types
//!
//! Public model of a parsed `.dbc` file.

pub mod attributes;
pub mod database;
pub mod errors;
pub mod message;
pub mod node;
pub mod signal;
pub mod value_table;
