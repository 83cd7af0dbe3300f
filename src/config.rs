/// Options for configuring the [`DStarLite`](crate::DStarLite) Planner
///
/// Default options:
/// ```
/// # use incremental_pathfinding::PlannerConfig;
/// assert_eq!(PlannerConfig { goal_dist: 0.95 }, Default::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// How close (in meters) the end of a Path has to get to the goal (defaults to `0.95`).
    ///
    /// Divided by the resolution of the Graph and rounded down, this gives the number of cells
    /// the last Node of a Path may be away from the goal along each axis. The tolerance is a
    /// square around the goal, not a circle.
    pub goal_dist: f64,
}

impl PlannerConfig {
    /// a PlannerConfig that only accepts the goal cell itself as the end of a Path
    ///
    /// Values:
    /// ```
    /// # use incremental_pathfinding::PlannerConfig;
    /// assert_eq!(PlannerConfig { goal_dist: 0.0 }, PlannerConfig::EXACT_GOAL);
    /// ```
    pub const EXACT_GOAL: PlannerConfig = PlannerConfig { goal_dist: 0.0 };

    /// The tolerance around the goal in cells, for a Grid with the given resolution
    pub fn goal_range(&self, resolution: f64) -> usize {
        let range = (self.goal_dist / resolution).floor();
        if range.is_finite() && range > 0.0 {
            range as usize
        } else {
            0
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> PlannerConfig {
        PlannerConfig { goal_dist: 0.95 }
    }
}

/// Options for configuring a [`GridGraph`](crate::grid::GridGraph)
///
/// Default options:
/// ```
/// # use incremental_pathfinding::GridConfig;
/// assert_eq!(
///     GridConfig {
///         resolution: 1.0,
///         cspace_radius: 0.0,
///         lethal_threshold: 1.0,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// The size of a cell in meters (defaults to `1.0`)
    pub resolution: f64,
    /// How far (in meters) the Robot has to stay away from obstacles (defaults to `0.0`).
    ///
    /// Every cell takes the highest cost found within this radius.
    pub cspace_radius: f64,
    /// Cells with a cost of at least this value are obstacles (defaults to `1.0`)
    pub lethal_threshold: f64,
}

impl GridConfig {
    /// The default GridConfig with a different resolution
    /// ```
    /// # use incremental_pathfinding::GridConfig;
    /// let config = GridConfig::with_resolution(0.1);
    /// assert_eq!(config.resolution, 0.1);
    /// assert_eq!(config.cspace_radius, 0.0);
    /// ```
    pub fn with_resolution(resolution: f64) -> GridConfig {
        GridConfig {
            resolution,
            ..Default::default()
        }
    }

    /// The c-space radius in cells
    pub fn cspace_cells(&self) -> usize {
        (self.cspace_radius / self.resolution).ceil() as usize
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            resolution: 1.0,
            cspace_radius: 0.0,
            lethal_threshold: 1.0,
        }
    }
}
