//! A crate with the most common Neighborhoods

use crate::{Cost, Point};
use std::fmt::Debug;

/// Defines how a Path can move along the Grid.
///
/// Different Scenarios may have different constraints as to how a Path may be formed.
/// For example if a Robot can only move along the 4 cardinal directions, any Paths generated
/// should reflect that by only containing those steps.
///
/// This Trait is a generalized solution to that problem. It provides a function to query all
/// neighboring Points of an existing Point, the length of a single step and a Heuristic for
/// how far apart two Points are.
///
/// The most common implementations of this Trait are already provided by this Module:
/// - [`ManhattanNeighborhood`] for Robots that can move
/// up, down, left or right
/// - [`MooreNeighborhood`] for Robots that can move
/// up, down, left, right, as well as the 4 diagonals (up-right, ...)
pub trait Neighborhood: Clone + Debug {
    /// Provides a list of Neighbors of a Point
    ///
    /// Note that it is not necessary to check weather the Tile at a Point is solid or not.
    /// That check is done later.
    ///
    /// The Neighbors have to be appended to `target` in the same order on every call, since
    /// the order decides between equally good Paths.
    fn get_all_neighbors(&self, point: Point, target: &mut Vec<Point>);
    /// The distance covered by a single step from `a` to its neighbor `b`, in cells.
    fn step_length(&self, a: Point, b: Point) -> Cost;
    /// Gives a Heuristic for how long it takes to reach `goal` from `point`, in cells.
    ///
    /// This has to be the Distance between the two Points in the Metric of your Neighborhood,
    /// or less. Overestimating leads to worse Paths and more work for the Planner.
    fn heuristic(&self, point: Point, goal: Point) -> Cost;
}

/// A Neighborhood for Robots moving along the 4 cardinal directions.
///
/// Also known as [Von Neumann Neighborhood](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood),
/// Manhattan Metric or [Taxicab Geometry](https://en.wikipedia.org/wiki/Taxicab_geometry).
///
/// ```no_code
/// R: Robot, o: reachable in one step
///   o
///   |
/// o-R-o
///   |
///   o
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManhattanNeighborhood {
    rows: usize,
    cols: usize,
}

impl ManhattanNeighborhood {
    /// Creates a new ManhattanNeighborhood.
    ///
    /// `rows` and `cols` are the size of the Grid to move on.
    pub fn new(rows: usize, cols: usize) -> ManhattanNeighborhood {
        ManhattanNeighborhood { rows, cols }
    }
}

impl Neighborhood for ManhattanNeighborhood {
    fn get_all_neighbors(&self, point: Point, target: &mut Vec<Point>) {
        let (rows, cols) = (self.rows, self.cols);
        let (row, col) = point;

        if row > 0 {
            target.push((row - 1, col));
        }
        if col + 1 < cols {
            target.push((row, col + 1));
        }
        if row + 1 < rows {
            target.push((row + 1, col));
        }
        if col > 0 {
            target.push((row, col - 1));
        }
    }
    fn step_length(&self, _a: Point, _b: Point) -> Cost {
        1.0
    }
    fn heuristic(&self, point: Point, goal: Point) -> Cost {
        (point.0.abs_diff(goal.0) + point.1.abs_diff(goal.1)) as Cost
    }
}

/// A Neighborhood for Robots moving along the 4 cardinal directions and the 4 diagonals.
///
/// Also known as [Moore Neighborhood](https://en.wikipedia.org/wiki/Moore_neighborhood).
/// Diagonal steps have a length of `sqrt(2)`, and the Heuristic is the Euclidean distance.
///
/// ```no_code
/// R: Robot, o: reachable in one step
/// o o o
///  \|/
/// o-R-o
///  /|\
/// o o o
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MooreNeighborhood {
    rows: usize,
    cols: usize,
}

impl MooreNeighborhood {
    /// Creates a new MooreNeighborhood.
    ///
    /// `rows` and `cols` are the size of the Grid to move on.
    pub fn new(rows: usize, cols: usize) -> MooreNeighborhood {
        MooreNeighborhood { rows, cols }
    }
}

const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

impl Neighborhood for MooreNeighborhood {
    fn get_all_neighbors(&self, point: Point, target: &mut Vec<Point>) {
        let (rows, cols) = (self.rows as isize, self.cols as isize);

        let iter = MOORE_OFFSETS
            .iter()
            .map(|(dr, dc)| (point.0 as isize + dr, point.1 as isize + dc))
            .filter(|&(r, c)| r >= 0 && c >= 0 && r < rows && c < cols)
            .map(|(r, c)| (r as usize, c as usize));

        target.extend(iter);
    }
    fn step_length(&self, a: Point, b: Point) -> Cost {
        if a.0 != b.0 && a.1 != b.1 {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    }
    fn heuristic(&self, point: Point, goal: Point) -> Cost {
        let diff_0 = point.0.abs_diff(goal.0) as Cost;
        let diff_1 = point.1.abs_diff(goal.1) as Cost;
        diff_0.hypot(diff_1)
    }
}
