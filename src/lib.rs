#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to incrementally repair shortest Paths on a changing Grid.
//!
//! ## Introduction
//! A Robot driving through an unknown environment learns about obstacles while it moves. Every
//! new sensor reading may invalidate the Path it is following, but running a full A* search after
//! every reading throws away almost all of the work done before: a new wall usually only
//! affects a small part of the Grid.
//!
//! This crate implements [D* Lite](http://idm-lab.org/bib/abstracts/papers/aaai02b.pdf), an
//! incremental variant of A*. The Planner searches backwards from the goal and keeps two
//! estimates per explored cell: `g`, the best known cost to the goal, and `rhs`, a one-step
//! lookahead computed from the neighbors. Cells where the two disagree are queued by priority.
//! When cells change, only the cells around them are re-evaluated, and the search continues
//! from the state it was left in, until the Path from the Robot's current position is repaired.
//!
//! The Planner works on anything implementing the [`Graph`] Trait. [`GridGraph`](grid::GridGraph)
//! is an implementation on top of an occupancy Grid, with obstacle inflation for the size of
//! the Robot.
//!
//! ## Examples
//! Creating the Grid and planning the first Path:
//! ```
//! use incremental_pathfinding::prelude::*;
//!
//! // 0 = free, 1 = gravel, 2 = wall
//! let cells = [
//!     [0, 0, 0, 0, 0],
//!     [0, 2, 2, 2, 0],
//!     [0, 1, 0, 2, 0],
//!     [0, 1, 0, 2, 0],
//!     [0, 0, 0, 0, 0],
//! ];
//! const COST_MAP: [f64; 3] = [0.0, 0.5, 1.0];
//!
//! let grid = GridGraph::from_costs(
//!     (5, 5),                                   // the size of the Grid
//!     |(row, col)| COST_MAP[cells[row][col]],   // the cost of every cell
//!     MooreNeighborhood::new(5, 5),             // the Neighborhood
//!     (2, 2),                                   // the start
//!     (0, 4),                                   // the goal
//!     GridConfig::default(),                    // resolution, c-space, ...
//! )
//! .unwrap();
//!
//! let mut planner = DStarLite::new(&grid, PlannerConfig::default()).unwrap();
//! let (path, _) = planner.plan(&grid).unwrap();
//!
//! assert_eq!(path.first(), Some(&(2, 2)));
//! assert_eq!(path.last(), Some(&(0, 4)));
//! ```
//!
//! ### Updating the Grid
//! Changes to the Grid are recorded by the Grid itself and picked up by the next call to
//! [`plan`](DStarLite::plan). Once the Planner consumed them, the owner of the Grid clears them.
//! ```
//! # use incremental_pathfinding::prelude::*;
//! # let mut grid = GridGraph::new((5, 5), (2, 2), (0, 4), GridConfig::default()).unwrap();
//! # let mut planner = DStarLite::new(&grid, PlannerConfig::default()).unwrap();
//! # planner.plan(&grid).unwrap();
//! // a sensor reports a wall, the Robot moves one step
//! grid.set_cell((1, 3), 1.0).unwrap();
//! grid.set_start((2, 1)).unwrap();
//!
//! let (path, _) = planner.plan(&grid).unwrap();
//! grid.clear_changed_cells();
//!
//! assert_eq!(path.first(), Some(&(2, 1)));
//! assert!(!path.iter().any(|&cell| cell == (1, 3)));
//! ```
//!
//! ### Unreachable goals
//! If the goal cannot be reached, the search still terminates, and asking for a Path returns
//! an Error:
//! ```
//! # use incremental_pathfinding::prelude::*;
//! let mut grid = GridGraph::new((3, 3), (0, 0), (2, 2), GridConfig::default()).unwrap();
//! grid.set_cells([((0, 1), 1.0), ((1, 0), 1.0), ((1, 1), 1.0)]).unwrap();
//!
//! let mut planner = DStarLite::new(&grid, PlannerConfig::default()).unwrap();
//! planner.compute_shortest_path(&grid);
//!
//! assert!(!planner.is_start_reachable(&grid));
//! assert!(matches!(
//!     planner.construct_optimal_path(&grid),
//!     Err(PlannerError::GoalUnreachable { .. })
//! ));
//! ```

/// A shorthand for `(row, col)` indices on the Grid
pub type Point = (usize, usize);

/// The Type used for all costs, Heuristics and Keys
pub type Cost = f64;

pub mod node;
pub use self::node::Node;

pub mod key;
pub use self::key::Key;

pub mod values;

pub mod frontier;

pub mod graph;
pub use self::graph::Graph;

pub mod neighbors;

pub mod grid;

mod path;
pub use self::path::Path;

mod planner;
pub use self::planner::{DStarLite, PlanStats};

mod config;
pub use self::config::{GridConfig, PlannerConfig};

pub mod error;
pub use self::error::PlannerError;

/// The prelude for this crate.
pub mod prelude {
    pub use crate::{
        error::PlannerError,
        grid::GridGraph,
        neighbors::{ManhattanNeighborhood, MooreNeighborhood, Neighborhood},
        DStarLite, Graph, GridConfig, Node, Path, PlanStats, PlannerConfig,
    };
}
