//! The interface between the Planner and the map it plans on

use crate::{Cost, Node, Point};

/// Everything the [`DStarLite`](crate::DStarLite) Planner needs to know about the world.
///
/// The Planner never stores a Graph. It is handed one on every call, which leaves the owner
/// free to update the map between planning cycles. The only thing the Planner reads and does not
/// own is [`changed_cells`](Graph::changed_cells); clearing that log once a cycle has consumed it
/// is the job of the Graph's owner.
///
/// [`GridGraph`](crate::grid::GridGraph) is a ready-made implementation on top of an occupancy
/// Grid.
pub trait Graph {
    /// Where the Robot currently is. The Path is planned from here.
    fn start(&self) -> Node;
    /// Where the Robot wants to go.
    fn goal(&self) -> Node;
    /// `true` if the Node is part of the Graph
    fn contains(&self, node: Node) -> bool;
    /// Appends all Nodes reachable in one step from `node` to `target`.
    ///
    /// The order should be the same on every call for reproducible Paths.
    fn neighbors(&self, node: Node, target: &mut Vec<Node>);
    /// The cost of moving between the two neighboring Nodes.
    ///
    /// Infinity marks a blocked step. A NaN is treated the same way.
    fn traversal_cost(&self, a: Node, b: Node) -> Cost;
    /// An estimate of the cost from `node` to [`start`](Graph::start) that must not
    /// overestimate the real cost for the Paths to be optimal.
    fn heuristic(&self, node: Node) -> Cost;
    /// The accumulated replan offset.
    ///
    /// Has to grow by the heuristic distance between the old and the new start every time
    /// the start moves.
    fn k_m(&self) -> Cost;
    /// The size of a cell in meters
    fn resolution(&self) -> f64;
    /// The cells whose cost changed since the last planning cycle
    fn changed_cells(&self) -> &[Point];
    /// Appends every Node whose traversal costs may have changed when `cell` changed, taking
    /// the footprint of the Robot into account.
    fn nodes_affected_by_cell(&self, cell: Point, target: &mut Vec<Node>);
}
