//! Navigation-subsystem error type.

use thiserror::Error;

use tc_core::Cell;

/// Errors produced by `tc-nav`.
#[derive(Debug, Error)]
pub enum NavError {
    /// The destination cell can never be entered.  Pick another target
    /// rather than retrying this one.
    #[error("target {target} is impassable")]
    ImpassableTarget { target: Cell },

    /// The search gave up without reaching the target, either because the
    /// open set ran dry or because it stopped making progress.
    #[error("no path from {from} to {to} after {expansions} expansions")]
    NoPathFound { from: Cell, to: Cell, expansions: u32 },

    #[error("cell {0} lies outside the navigation grid")]
    OutOfBounds(Cell),

    #[error("unknown tile kind {0:?}")]
    UnknownTile(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NavResult<T> = Result<T, NavError>;
