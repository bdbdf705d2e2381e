//! # compare
//!
//! Comparison of resolved file pairs. Matching old and new files (directory
//! walking, name pairing) is left to the caller; this module parses each
//! pair, diffs it and classifies the pair as a whole.

use crate::dbc::{
    self,
    types::{
        database::Database,
        errors::{DbcError, InvariantError},
    },
};
use crate::diff::{self, ChangeSet, ChangeStatus, DiffOptions};

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One logical file present in the old set, the new set, or both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePair {
    /// Name reported for the pair (usually the file name shared by both sides).
    pub name: String,
    pub old: Option<PathBuf>,
    pub new: Option<PathBuf>,
}

impl FilePair {
    pub fn new(name: &str, old: Option<PathBuf>, new: Option<PathBuf>) -> Self {
        FilePair {
            name: name.to_string(),
            old,
            new,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairReport {
    pub name: String,
    /// `Added` / `Removed` when only one side exists, otherwise `Modified`
    /// or `Unchanged` depending on the change set.
    pub status: ChangeStatus,
    pub changes: ChangeSet,
}

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("pair '{name}' has neither an old nor a new file")]
    EmptyPair { name: String },
    #[error(transparent)]
    Dbc(#[from] DbcError),
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

/// Result of one pair inside [`compare_pairs`].
#[derive(Debug)]
pub struct PairOutcome {
    pub name: String,
    pub result: Result<PairReport, CompareError>,
}

fn load(path: Option<&Path>) -> Result<Database, DbcError> {
    match path {
        Some(p) => dbc::from_file(p),
        None => Ok(Database::default()),
    }
}

/// Parses and diffs one pair. A missing side compares as an empty database,
/// so every message of an added file is reported as added.
pub fn compare_pair(pair: &FilePair, options: &DiffOptions) -> Result<PairReport, CompareError> {
    if pair.old.is_none() && pair.new.is_none() {
        return Err(CompareError::EmptyPair {
            name: pair.name.clone(),
        });
    }
    let old: Database = load(pair.old.as_deref())?;
    let new: Database = load(pair.new.as_deref())?;

    let changes: ChangeSet = diff::diff(&old, &new, options)?;

    let status: ChangeStatus = match (&pair.old, &pair.new) {
        (None, _) => ChangeStatus::Added,
        (_, None) => ChangeStatus::Removed,
        _ => ChangeStatus::from_deltas(changes.has_changes()),
    };
    info!("{}: {} ({})", pair.name, status, changes.summary());

    Ok(PairReport {
        name: pair.name.clone(),
        status,
        changes,
    })
}

/// Compares every pair on the rayon thread pool.
///
/// Each pair gets its own `Result`; a pair that fails to read, parse or
/// validate does not affect the others. Outcomes are sorted by pair name.
/// Unchanged pairs are dropped unless `options.include_unchanged` is set.
pub fn compare_pairs(pairs: &[FilePair], options: &DiffOptions) -> Vec<PairOutcome> {
    let mut outcomes: Vec<PairOutcome> = pairs
        .par_iter()
        .map(|pair| {
            let result = compare_pair(pair, options);
            if let Err(e) = &result {
                warn!("{}: {}", pair.name, e);
            }
            PairOutcome {
                name: pair.name.clone(),
                result,
            }
        })
        .filter(|o| options.include_unchanged || !matches!(&o.result, Ok(r) if r.status == ChangeStatus::Unchanged))
        .collect();
    outcomes.sort_by(|a, b| a.name.cmp(&b.name));
    outcomes
}
