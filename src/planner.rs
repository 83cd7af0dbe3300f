//! The D* Lite engine

use crate::{
    error::{PlannerError, Result},
    frontier::Frontier,
    node::NodeSet,
    values::{Consistency, ValueStore, Values},
    Cost, Graph, Key, Node, Path, PlannerConfig, Point,
};

/// Counters of a single planning cycle, for diagnostics only
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// how many explored Nodes were re-evaluated because of changed cells
    pub nodes_updated: usize,
    /// how many Nodes were popped from the Frontier
    pub nodes_expanded: usize,
}

/// An incremental shortest-path Planner.
///
/// The Planner searches backwards from the goal to the start of a [`Graph`] and keeps its
/// search state (a `g` and `rhs` value per explored Node, and a [`Frontier`] of Nodes where the
/// two disagree) between planning cycles. When cells of the map change, only the Nodes around
/// them are re-evaluated and only as much of the search is repeated as is needed to repair the
/// Path.
///
/// The Planner does not store the Graph. It is passed to every call, so that the owner can update
/// the map between cycles. A typical control loop looks like this:
/// 1. sensors update the map, which records the changed cells
/// 2. [`update_nodes_around_updated_cells`](DStarLite::update_nodes_around_updated_cells)
/// 3. [`compute_shortest_path`](DStarLite::compute_shortest_path)
/// 4. [`construct_optimal_path`](DStarLite::construct_optimal_path)
/// 5. the owner clears the changed cells and moves the Robot along the Path
///
/// Steps 2 to 4 are combined in [`plan`](DStarLite::plan).
///
/// The goal is fixed for the lifetime of a Planner. A new goal needs a new Planner.
///
/// ## Examples
/// ```
/// use incremental_pathfinding::prelude::*;
///
/// let mut grid = GridGraph::new((5, 5), (0, 0), (4, 4), GridConfig::default()).unwrap();
/// let mut planner = DStarLite::new(&grid, PlannerConfig::default()).unwrap();
///
/// let (path, _) = planner.plan(&grid).unwrap();
/// assert_eq!(path, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
///
/// // a wall appears on the diagonal
/// grid.set_cells([((2, 2), 1.0), ((1, 3), 1.0), ((3, 1), 1.0)]).unwrap();
/// let (path, stats) = planner.plan(&grid).unwrap();
/// grid.clear_changed_cells();
///
/// assert!(stats.nodes_updated > 0);
/// assert!(!path.iter().any(|&p| p == (2, 2)));
/// assert_eq!(path.last(), Some(&(4, 4)));
/// ```
#[derive(Clone, Debug)]
pub struct DStarLite {
    values: ValueStore,
    frontier: Frontier,
    goal: Node,
    config: PlannerConfig,
}

impl DStarLite {
    /// Creates a Planner for the start and goal of the Graph and seeds the search at the goal.
    ///
    /// Fails if the start or the goal is not part of the Graph.
    pub fn new<G: Graph>(graph: &G, config: PlannerConfig) -> Result<DStarLite> {
        for (role, node) in [("start", graph.start()), ("goal", graph.goal())] {
            if !graph.contains(node) {
                log::warn!("cannot plan: {} {} is not part of the graph", role, node);
                return Err(PlannerError::NodeOutOfBounds { role, node });
            }
        }

        let mut planner = DStarLite {
            values: ValueStore::new(),
            frontier: Frontier::new(),
            goal: graph.goal(),
            config,
        };
        planner.initialize(graph);
        Ok(planner)
    }

    fn initialize<G: Graph>(&mut self, graph: &G) {
        self.values.set_values(graph.start(), Cost::INFINITY, Cost::INFINITY);
        self.values.set_values(self.goal, Cost::INFINITY, 0.0);
        let key = self.calculate_key(graph, self.goal);
        self.frontier.insert(self.goal, key);
    }

    /// The options of this Planner
    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// The goal all Paths lead to
    pub fn goal(&self) -> Node {
        self.goal
    }

    /// The current `g` of a Node, infinity if it was never explored
    pub fn g(&self, node: Node) -> Cost {
        self.values.g(node)
    }

    /// The current `rhs` of a Node, infinity if it was never explored
    pub fn rhs(&self, node: Node) -> Cost {
        self.values.rhs(node)
    }

    /// All explored Nodes
    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    /// The Nodes waiting to be expanded
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// `true` if the last search found a Path from the start of the Graph to the goal
    pub fn is_start_reachable<G: Graph>(&self, graph: &G) -> bool {
        self.values.g(graph.start()).is_finite()
    }

    /// The priority of a Node: `<min(g, rhs) + h(node) + k_m, min(g, rhs)>`
    pub fn calculate_key<G: Graph>(&self, graph: &G, node: Node) -> Key {
        let min = self.values.get(node).min();
        Key::new(min + graph.heuristic(node) + graph.k_m(), min)
    }

    /// Re-evaluates `rhs` of a Node from its neighbors and puts it into the Frontier if and only
    /// if it is locally inconsistent afterwards. `g` is left untouched, and so is `rhs` of the
    /// goal, which stays at `0`.
    pub fn update_node<G: Graph>(&mut self, graph: &G, node: Node) {
        self.values.ensure(node);
        self.frontier.remove(node);

        if node != self.goal {
            let mut neighbors = Vec::with_capacity(8);
            graph.neighbors(node, &mut neighbors);
            let rhs = neighbors
                .into_iter()
                .map(|other| traversal_cost(graph, node, other) + self.values.g(other))
                .fold(Cost::INFINITY, Cost::min);
            let g = self.values.g(node);
            self.values.set_values(node, g, rhs);
        }

        let Values { g, rhs } = self.values.get(node);
        if g != rhs {
            let key = self.calculate_key(graph, node);
            self.frontier.insert(node, key);
        }
    }

    /// Expands Nodes until the start is locally consistent and no queued Node could still
    /// lower its cost.
    ///
    /// The first call is equivalent to an A* search from the goal. Later calls only repair what
    /// changed since. Returns the number of Nodes popped from the Frontier.
    ///
    /// If the goal cannot be reached, the search still terminates, with `g` and `rhs` of the
    /// start at infinity. See [`is_start_reachable`](DStarLite::is_start_reachable).
    pub fn compute_shortest_path<G: Graph>(&mut self, graph: &G) -> usize {
        let start = graph.start();
        let mut expanded = 0;

        loop {
            let start_key = self.calculate_key(graph, start);
            let start_values = self.values.get(start);
            if !self.frontier.top_key().less_than(&start_key) && start_values.g == start_values.rhs
            {
                break;
            }
            let Some((node, old_key)) = self.frontier.pop() else {
                break;
            };
            expanded += 1;

            let new_key = self.calculate_key(graph, node);
            if old_key.less_than(&new_key) {
                // queued before k_m grew or its neighbors changed
                log::trace!("requeue {} from {} to {}", node, old_key, new_key);
                self.frontier.insert(node, new_key);
                continue;
            }

            let mut neighbors = Vec::with_capacity(9);
            graph.neighbors(node, &mut neighbors);

            let values = self.values.get(node);
            let rhs = values.rhs;
            match values.consistency() {
                Consistency::Overconsistent => {
                    log::trace!("expand {} overconsistent, g = {}", node, rhs);
                    self.values.set_values(node, rhs, rhs);
                }
                Consistency::Underconsistent | Consistency::Consistent => {
                    log::trace!("expand {} underconsistent, rhs = {}", node, rhs);
                    self.values.set_values(node, Cost::INFINITY, rhs);
                    neighbors.push(node);
                }
            }
            for other in neighbors {
                self.update_node(graph, other);
            }
        }

        log::debug!(
            "expanded {} nodes, g(start) = {}, {} nodes queued, {} explored",
            expanded,
            self.values.g(start),
            self.frontier.len(),
            self.values.len()
        );
        expanded
    }

    /// Re-evaluates every explored Node whose traversal costs may have changed with the
    /// [`changed_cells`](Graph::changed_cells) of the Graph.
    ///
    /// Nodes that were never explored are skipped, and every Node is only updated once.
    /// This does not repair the Path by itself, [`compute_shortest_path`](DStarLite::compute_shortest_path)
    /// has to be called afterwards. Returns the number of updated Nodes.
    pub fn update_nodes_around_updated_cells<G: Graph>(&mut self, graph: &G) -> usize {
        let mut updated = NodeSet::new();
        let mut affected = Vec::new();

        for &cell in graph.changed_cells() {
            affected.clear();
            graph.nodes_affected_by_cell(cell, &mut affected);
            for &node in affected.iter() {
                if !self.values.contains(node) || !updated.insert(node) {
                    continue;
                }
                self.update_node(graph, node);
            }
        }

        if !updated.is_empty() {
            log::debug!(
                "{} changed cells, updated {} nodes",
                graph.changed_cells().len(),
                updated.len()
            );
        }
        updated.len()
    }

    /// Walks from the start towards the goal, always stepping to the explored neighbor with the
    /// lowest `traversal_cost + g`, until the goal is [in range](DStarLite::is_within_range_of_goal).
    ///
    /// Of two equally good neighbors, the one enumerated first by the Graph wins.
    ///
    /// ## Errors
    /// - [`GoalUnreachable`](PlannerError::GoalUnreachable) if the search found no Path
    /// - [`PathUnavailable`](PlannerError::PathUnavailable) if the walk gets stuck or runs in a circle
    pub fn construct_optimal_path<G: Graph>(&self, graph: &G) -> Result<Path<Point>> {
        let start = graph.start();
        let mut current = start;
        let mut points = vec![start.index()];
        let mut cost = 0.0;

        if self.is_within_range_of_goal(graph, current) {
            return Ok(Path::new(points, cost));
        }
        let start_values = self.values.get(start);
        if start_values.g.is_infinite() && start_values.rhs.is_infinite() {
            return Err(PlannerError::GoalUnreachable { start });
        }

        let mut visited = NodeSet::new();
        visited.insert(start);
        let mut neighbors = Vec::with_capacity(8);

        while !self.is_within_range_of_goal(graph, current) {
            neighbors.clear();
            graph.neighbors(current, &mut neighbors);

            let mut best = None;
            let mut min_cost = Cost::INFINITY;
            for &other in neighbors.iter() {
                if !self.values.contains(other) {
                    continue;
                }
                let step = traversal_cost(graph, current, other);
                let total = step + self.values.g(other);
                if total < min_cost {
                    min_cost = total;
                    best = Some((other, step));
                }
            }

            let steps = points.len() - 1;
            let Some((next, step)) = best else {
                log::warn!("no way on from {} after {} steps", current, steps);
                return Err(PlannerError::PathUnavailable { at: current, steps });
            };
            if !visited.insert(next) {
                log::warn!("path runs in a circle at {} after {} steps", next, steps);
                return Err(PlannerError::PathUnavailable { at: next, steps });
            }

            cost += step;
            points.push(next.index());
            current = next;
        }

        log::debug!("path of {} steps, cost {}", points.len() - 1, cost);
        Ok(Path::new(points, cost))
    }

    /// `true` if the Node lies within [`goal_dist`](PlannerConfig::goal_dist) of the goal along
    /// both axes
    pub fn is_within_range_of_goal<G: Graph>(&self, graph: &G, node: Node) -> bool {
        let range = self.config.goal_range(graph.resolution());
        node.row().abs_diff(self.goal.row()) <= range
            && node.col().abs_diff(self.goal.col()) <= range
    }

    /// Runs one planning cycle: updates the Nodes around the changed cells, repairs the search
    /// and constructs the Path from the current start.
    ///
    /// The changed cells of the Graph should be cleared afterwards.
    pub fn plan<G: Graph>(&mut self, graph: &G) -> Result<(Path<Point>, PlanStats)> {
        let start = graph.start();
        if !graph.contains(start) {
            log::warn!("cannot plan: start {} is not part of the graph", start);
            return Err(PlannerError::NodeOutOfBounds {
                role: "start",
                node: start,
            });
        }

        let stats = PlanStats {
            nodes_updated: self.update_nodes_around_updated_cells(graph),
            nodes_expanded: self.compute_shortest_path(graph),
        };
        let path = self.construct_optimal_path(graph)?;
        Ok((path, stats))
    }
}

fn traversal_cost<G: Graph>(graph: &G, a: Node, b: Node) -> Cost {
    let cost = graph.traversal_cost(a, b);
    if cost.is_nan() {
        Cost::INFINITY
    } else {
        cost
    }
}
