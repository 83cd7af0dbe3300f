//! The errors returned by this crate

use crate::Node;

/// A shorthand for Results with a [`PlannerError`]
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Everything that can go wrong while setting up a Graph or planning on it.
///
/// An unreachable goal is not a bug in the Planner: it is the regular outcome of a search on a
/// map where the start is cut off, and is only reported as an error when a Path is requested.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// A Grid needs at least one row and one column
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// the requested number of rows
        rows: usize,
        /// the requested number of columns
        cols: usize,
    },
    /// The resolution has to be a positive, finite number of meters per cell
    #[error("invalid resolution {0}, must be positive and finite")]
    InvalidResolution(f64),
    /// The c-space radius has to be a non-negative, finite number of meters
    #[error("invalid c-space radius {0}, must be non-negative and finite")]
    InvalidCspaceRadius(f64),
    /// The start, the goal or an updated cell is not part of the Graph
    #[error("{role} {node} is not part of the graph")]
    NodeOutOfBounds {
        /// `"start"`, `"goal"` or `"cell"`
        role: &'static str,
        /// the offending Node
        node: Node,
    },
    /// The search finished without finding any Path from the start to the goal
    #[error("no path from {start} to the goal exists")]
    GoalUnreachable {
        /// the start the search was run for
        start: Node,
    },
    /// Walking along the computed costs got stuck before reaching the goal
    #[error("path unavailable: stuck at {at} after {steps} steps")]
    PathUnavailable {
        /// the last Node of the partial Path
        at: Node,
        /// how many steps were taken before getting stuck
        steps: usize,
    },
}
