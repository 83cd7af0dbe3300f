//! An occupancy Grid that can be handed to the Planner as its [`Graph`]

use crate::{
    error::{PlannerError, Result},
    neighbors::{MooreNeighborhood, Neighborhood},
    Cost, Graph, GridConfig, Node, Point,
};

mod inflation;

/// An occupancy Grid with c-space inflation, a moving start and a log of changed cells.
///
/// Every cell has a raw cost between `0.0` (free) and [`lethal_threshold`](GridConfig::lethal_threshold)
/// (obstacle). Cells that were never observed should be left free: D* Lite assumes unknown
/// space to be traversable and repairs the Path once a sensor says otherwise.
///
/// Moving between two neighboring cells costs the length of the step in meters, scaled by
/// `1 + max(cost_a, cost_b)` of the inflated costs of both cells, or infinity if either of
/// them is an obstacle.
///
/// ## Examples
/// ```
/// use incremental_pathfinding::prelude::*;
///
/// let mut grid = GridGraph::new((10, 10), (0, 0), (9, 9), GridConfig::default()).unwrap();
///
/// // a sensor reports an obstacle
/// grid.set_cell((5, 5), 1.0).unwrap();
/// assert_eq!(grid.changed_cells(), &[(5, 5)]);
///
/// // the robot moves, which grows the replan offset
/// grid.set_start((1, 1)).unwrap();
/// assert!(grid.k_m() > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct GridGraph<N: Neighborhood = MooreNeighborhood> {
    rows: usize,
    cols: usize,
    costs: Vec<f64>,
    inflated: Vec<f64>,
    offsets: Vec<(isize, isize)>,
    neighborhood: N,
    config: GridConfig,
    start: Node,
    goal: Node,
    k_m: Cost,
    changed: Vec<Point>,
}

impl GridGraph<MooreNeighborhood> {
    /// Creates an eight-connected Grid where every cell is free
    ///
    /// ## Arguments
    /// - `(rows, cols)` - the size of the Grid
    /// - `start` - where the Robot is
    /// - `goal` - where the Robot wants to go
    /// - `config` - resolution and c-space options. (See [`GridConfig`])
    pub fn new(
        (rows, cols): (usize, usize),
        start: Point,
        goal: Point,
        config: GridConfig,
    ) -> Result<GridGraph<MooreNeighborhood>> {
        GridGraph::from_costs(
            (rows, cols),
            |_| 0.0,
            MooreNeighborhood::new(rows, cols),
            start,
            goal,
            config,
        )
    }
}

impl<N: Neighborhood> GridGraph<N> {
    /// Creates a Grid from existing costs
    ///
    /// ## Arguments
    /// - `(rows, cols)` - the size of the Grid
    /// - `get_cost` - the raw cost of every cell. (Cost >= `lethal_threshold` => obstacle)
    /// - `neighborhood` - how the Robot can move. (See [`Neighborhood`])
    /// - `start` - where the Robot is
    /// - `goal` - where the Robot wants to go
    /// - `config` - resolution and c-space options. (See [`GridConfig`])
    ///
    /// ## Examples
    /// ```
    /// use incremental_pathfinding::{prelude::*, Point};
    ///
    /// // 0 = empty, 1 = gravel, 2 = wall
    /// let grid = [
    ///     [0, 2, 0],
    ///     [0, 1, 0],
    ///     [0, 0, 0],
    /// ];
    /// const COST_MAP: [f64; 3] = [0.0, 0.5, 1.0];
    ///
    /// let graph = GridGraph::from_costs(
    ///     (3, 3),
    ///     |(row, col): Point| COST_MAP[grid[row][col]],
    ///     ManhattanNeighborhood::new(3, 3),
    ///     (0, 0),
    ///     (0, 2),
    ///     GridConfig::default(),
    /// )
    /// .unwrap();
    ///
    /// assert!(graph.is_lethal((0, 1)));
    /// assert_eq!(graph.cost((1, 1)), Some(0.5));
    /// ```
    pub fn from_costs(
        (rows, cols): (usize, usize),
        get_cost: impl Fn(Point) -> f64,
        neighborhood: N,
        start: Point,
        goal: Point,
        config: GridConfig,
    ) -> Result<GridGraph<N>> {
        if rows == 0 || cols == 0 {
            return Err(PlannerError::InvalidDimensions { rows, cols });
        }
        if !(config.resolution.is_finite() && config.resolution > 0.0) {
            return Err(PlannerError::InvalidResolution(config.resolution));
        }
        if !(config.cspace_radius.is_finite() && config.cspace_radius >= 0.0) {
            return Err(PlannerError::InvalidCspaceRadius(config.cspace_radius));
        }

        let mut costs = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                costs.push(get_cost((row, col)));
            }
        }

        let offsets = inflation::disc_offsets(config.cspace_cells());
        let inflated = inflation::inflate_all(&costs, (rows, cols), &offsets);

        let mut graph = GridGraph {
            rows,
            cols,
            costs,
            inflated,
            offsets,
            neighborhood,
            config,
            start: Node::from(start),
            goal: Node::from(goal),
            k_m: 0.0,
            changed: Vec::new(),
        };
        graph.check_bounds("start", start)?;
        graph.check_bounds("goal", goal)?;

        log::debug!(
            "created {}x{} grid, c-space radius {} cells",
            rows,
            cols,
            graph.config.cspace_cells()
        );
        Ok(graph)
    }

    /// The size of the Grid as `(rows, cols)`
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The options this Grid was created with
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// The Neighborhood of this Grid
    pub fn neighborhood(&self) -> &N {
        &self.neighborhood
    }

    /// `true` if the Point lies inside the Grid
    pub fn in_bounds(&self, (row, col): Point) -> bool {
        row < self.rows && col < self.cols
    }

    /// The raw cost of a cell, as last set
    pub fn cost(&self, point: Point) -> Option<f64> {
        self.index_of(point).map(|i| self.costs[i])
    }

    /// The cost of a cell after c-space inflation
    pub fn inflated_cost(&self, point: Point) -> Option<f64> {
        self.index_of(point).map(|i| self.inflated[i])
    }

    /// `true` if the Robot cannot stand on the cell, either because of an obstacle on it or
    /// one within the c-space radius. Points outside the Grid are lethal as well.
    pub fn is_lethal(&self, point: Point) -> bool {
        self.inflated_cost(point)
            .map_or(true, |cost| cost >= self.config.lethal_threshold)
    }

    /// Sets the raw cost of a cell.
    ///
    /// Re-inflates the surrounding cells and records the cell in [`changed_cells`](Graph::changed_cells)
    /// if the cost actually changed. Returns whether it changed.
    pub fn set_cell(&mut self, point: Point, cost: f64) -> Result<bool> {
        let index = self.check_bounds("cell", point)?;
        let old = self.costs[index];
        if old == cost || (old.is_nan() && cost.is_nan()) {
            return Ok(false);
        }
        self.costs[index] = cost;

        let (row, col) = point;
        for &(dr, dc) in self.offsets.iter() {
            let (r, c) = (row as isize + dr, col as isize + dc);
            if r < 0 || c < 0 || r as usize >= self.rows || c as usize >= self.cols {
                continue;
            }
            let target = (r as usize, c as usize);
            let i = target.0 * self.cols + target.1;
            self.inflated[i] =
                inflation::inflate_cell(&self.costs, (self.rows, self.cols), &self.offsets, target);
        }

        self.changed.push(point);
        log::trace!("cell {:?} changed from {} to {}", point, old, cost);
        Ok(true)
    }

    /// Sets the raw costs of several cells, returning how many of them changed
    pub fn set_cells(&mut self, cells: impl IntoIterator<Item = (Point, f64)>) -> Result<usize> {
        let mut changed = 0;
        for (point, cost) in cells {
            if self.set_cell(point, cost)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Moves the Robot to a new start.
    ///
    /// Grows the replan offset by the heuristic distance between the old and the new start,
    /// which keeps the Keys already queued by the Planner comparable to new ones.
    pub fn set_start(&mut self, start: Point) -> Result<()> {
        self.check_bounds("start", start)?;
        let moved = self.neighborhood.heuristic(self.start.index(), start) * self.config.resolution;
        self.k_m += moved;
        self.start = Node::from(start);
        log::debug!("start moved to {:?}, k_m is now {}", start, self.k_m);
        Ok(())
    }

    /// Forgets the changed cells, once a planning cycle consumed them
    pub fn clear_changed_cells(&mut self) {
        self.changed.clear();
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(point.0 * self.cols + point.1)
        } else {
            None
        }
    }

    fn check_bounds(&self, role: &'static str, point: Point) -> Result<usize> {
        self.index_of(point).ok_or_else(|| {
            log::warn!("{} {:?} is outside of the {}x{} grid", role, point, self.rows, self.cols);
            PlannerError::NodeOutOfBounds {
                role,
                node: Node::from(point),
            }
        })
    }
}

impl<N: Neighborhood> Graph for GridGraph<N> {
    fn start(&self) -> Node {
        self.start
    }

    fn goal(&self) -> Node {
        self.goal
    }

    fn contains(&self, node: Node) -> bool {
        self.in_bounds(node.index())
    }

    fn neighbors(&self, node: Node, target: &mut Vec<Node>) {
        let mut points = Vec::with_capacity(8);
        self.neighborhood.get_all_neighbors(node.index(), &mut points);
        target.extend(points.into_iter().map(Node::from));
    }

    fn traversal_cost(&self, a: Node, b: Node) -> Cost {
        if a.chebyshev_distance(b) != 1 {
            return Cost::INFINITY;
        }
        let (Some(cost_a), Some(cost_b)) = (
            self.inflated_cost(a.index()),
            self.inflated_cost(b.index()),
        ) else {
            return Cost::INFINITY;
        };
        let cost = cost_a.max(cost_b);
        if cost >= self.config.lethal_threshold {
            return Cost::INFINITY;
        }
        let step = self.neighborhood.step_length(a.index(), b.index());
        step * self.config.resolution * (1.0 + cost.max(0.0))
    }

    fn heuristic(&self, node: Node) -> Cost {
        self.neighborhood.heuristic(node.index(), self.start.index()) * self.config.resolution
    }

    fn k_m(&self) -> Cost {
        self.k_m
    }

    fn resolution(&self) -> f64 {
        self.config.resolution
    }

    fn changed_cells(&self) -> &[Point] {
        &self.changed
    }

    fn nodes_affected_by_cell(&self, (row, col): Point, target: &mut Vec<Node>) {
        // a cell changes the inflated cost of everything within the c-space radius, and with it
        // the cost of every step into or out of those cells
        let reach = self.config.cspace_cells() + 1;
        let rows = row.saturating_sub(reach)..(row + reach + 1).min(self.rows);
        for r in rows {
            let cols = col.saturating_sub(reach)..(col + reach + 1).min(self.cols);
            target.extend(cols.map(|c| Node::new(r, c)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::ManhattanNeighborhood;

    #[test]
    fn validates_setup() {
        let config = GridConfig::default();
        assert_eq!(
            GridGraph::new((0, 4), (0, 0), (0, 0), config).unwrap_err(),
            PlannerError::InvalidDimensions { rows: 0, cols: 4 }
        );
        assert_eq!(
            GridGraph::new((4, 4), (0, 0), (4, 0), config).unwrap_err(),
            PlannerError::NodeOutOfBounds {
                role: "goal",
                node: Node::new(4, 0)
            }
        );
        assert_eq!(
            GridGraph::new((4, 4), (0, 9), (0, 0), config).unwrap_err(),
            PlannerError::NodeOutOfBounds {
                role: "start",
                node: Node::new(0, 9)
            }
        );
        assert!(matches!(
            GridGraph::new((4, 4), (0, 0), (3, 3), GridConfig::with_resolution(0.0)),
            Err(PlannerError::InvalidResolution(_))
        ));
        assert!(matches!(
            GridGraph::new(
                (4, 4),
                (0, 0),
                (3, 3),
                GridConfig {
                    cspace_radius: -1.0,
                    ..Default::default()
                }
            ),
            Err(PlannerError::InvalidCspaceRadius(_))
        ));
    }

    #[test]
    fn traversal_cost() {
        let config = GridConfig::with_resolution(0.5);
        let mut grid = GridGraph::new((5, 5), (0, 0), (4, 4), config).unwrap();
        let a = Node::new(2, 2);

        assert_eq!(grid.traversal_cost(a, Node::new(2, 3)), 0.5);
        assert_eq!(
            grid.traversal_cost(a, Node::new(3, 3)),
            std::f64::consts::SQRT_2 * 0.5
        );
        assert_eq!(grid.traversal_cost(a, Node::new(4, 4)), Cost::INFINITY);

        grid.set_cell((2, 3), 0.5).unwrap();
        assert_eq!(grid.traversal_cost(a, Node::new(2, 3)), 0.75);
        assert_eq!(grid.traversal_cost(Node::new(2, 3), a), 0.75);

        grid.set_cell((2, 3), 1.0).unwrap();
        assert_eq!(grid.traversal_cost(a, Node::new(2, 3)), Cost::INFINITY);

        grid.set_cell((2, 3), f64::NAN).unwrap();
        assert_eq!(grid.traversal_cost(a, Node::new(2, 3)), Cost::INFINITY);
    }

    #[test]
    fn changed_cells_log() {
        let mut grid = GridGraph::new((5, 5), (0, 0), (4, 4), GridConfig::default()).unwrap();

        assert_eq!(grid.set_cell((1, 1), 0.0), Ok(false));
        assert_eq!(grid.set_cells([((1, 1), 1.0), ((1, 2), 1.0), ((1, 1), 1.0)]), Ok(2));
        assert_eq!(grid.changed_cells(), &[(1, 1), (1, 2)]);
        assert!(grid.set_cell((5, 5), 1.0).is_err());

        grid.clear_changed_cells();
        assert!(grid.changed_cells().is_empty());
    }

    #[test]
    fn cspace_inflation_follows_updates() {
        let config = GridConfig {
            resolution: 0.1,
            cspace_radius: 0.2,
            lethal_threshold: 1.0,
        };
        let mut grid = GridGraph::new((9, 9), (0, 0), (8, 8), config).unwrap();

        grid.set_cell((4, 4), 1.0).unwrap();
        assert!(grid.is_lethal((4, 4)));
        assert!(grid.is_lethal((4, 6)));
        assert!(grid.is_lethal((2, 4)));
        assert!(!grid.is_lethal((4, 7)));
        assert!(!grid.is_lethal((2, 2)));
        assert_eq!(grid.cost((4, 6)), Some(0.0));

        grid.set_cell((4, 4), 0.0).unwrap();
        assert!(!grid.is_lethal((4, 6)));
        assert!(!grid.is_lethal((4, 4)));
    }

    #[test]
    fn affected_nodes_cover_the_footprint() {
        let config = GridConfig {
            resolution: 1.0,
            cspace_radius: 1.0,
            lethal_threshold: 1.0,
        };
        let grid = GridGraph::new((6, 6), (0, 0), (5, 5), config).unwrap();

        let mut nodes = vec![];
        grid.nodes_affected_by_cell((0, 0), &mut nodes);
        assert_eq!(nodes.len(), 9);
        assert!(nodes.contains(&Node::new(2, 2)));

        nodes.clear();
        grid.nodes_affected_by_cell((3, 3), &mut nodes);
        assert_eq!(nodes.len(), 25);
    }

    #[test]
    fn moving_start_grows_k_m() {
        let mut grid = GridGraph::from_costs(
            (5, 5),
            |_| 0.0,
            ManhattanNeighborhood::new(5, 5),
            (0, 0),
            (4, 4),
            GridConfig::with_resolution(2.0),
        )
        .unwrap();

        grid.set_start((1, 1)).unwrap();
        assert_eq!(grid.k_m(), 4.0);
        grid.set_start((1, 2)).unwrap();
        assert_eq!(grid.k_m(), 6.0);
        assert_eq!(grid.start(), Node::new(1, 2));
        assert_eq!(grid.heuristic(Node::new(1, 2)), 0.0);
        assert!(grid.set_start((9, 9)).is_err());
        assert_eq!(grid.k_m(), 6.0);
    }
}
