//! The identity of a search Node and collections keyed by it

use crate::Point;

/// A specialized [`HashMap`](hashbrown::HashMap) keyed by [`Node`]
pub type NodeMap<V> = hashbrown::HashMap<Node, V>;
/// A specialized [`HashSet`](hashbrown::HashSet) of [`Node`]s
pub type NodeSet = hashbrown::HashSet<Node>;

/// A cell of the Grid as seen by the search.
///
/// A Node is nothing more than its `(row, col)` index. Two Nodes with the same index are
/// interchangeable, which is what allows the Planner to reuse the values it computed for a
/// Node in an earlier planning cycle.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::Node;
/// let node = Node::new(2, 3);
///
/// assert_eq!(node.index(), (2, 3));
/// assert_eq!(node, Node::from((2, 3)));
/// assert_eq!(format!("{}", node), "(2, 3)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    row: usize,
    col: usize,
}

impl Node {
    /// Creates the Node for the cell at `(row, col)`
    pub const fn new(row: usize, col: usize) -> Node {
        Node { row, col }
    }

    /// The row of the cell
    pub fn row(self) -> usize {
        self.row
    }

    /// The column of the cell
    pub fn col(self) -> usize {
        self.col
    }

    /// The `(row, col)` index of the cell
    pub fn index(self) -> Point {
        (self.row, self.col)
    }

    /// Chebyshev distance in cells, i.e. the larger of the row and column offsets
    pub fn chebyshev_distance(self, other: Node) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl From<Point> for Node {
    fn from((row, col): Point) -> Node {
        Node::new(row, col)
    }
}

impl From<Node> for Point {
    fn from(node: Node) -> Point {
        node.index()
    }
}

use std::fmt;
impl fmt::Display for Node {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({}, {})", self.row, self.col)
    }
}
