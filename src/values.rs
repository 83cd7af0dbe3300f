//! The per-Node search state of the Planner

use crate::{node::NodeMap, Cost, Node};

/// The pair of estimates the Planner keeps for every Node it has touched.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Values {
    /// the best known cost from the Node to the goal
    pub g: Cost,
    /// the one-step lookahead of `g`, derived from the neighbors
    pub rhs: Cost,
}

impl Values {
    /// The Values of a Node that was never touched
    pub const UNSEEN: Values = Values {
        g: Cost::INFINITY,
        rhs: Cost::INFINITY,
    };

    /// Creates a new pair
    pub const fn new(g: Cost, rhs: Cost) -> Values {
        Values { g, rhs }
    }

    /// Classifies the pair, see [`Consistency`]
    pub fn consistency(&self) -> Consistency {
        if self.g == self.rhs {
            Consistency::Consistent
        } else if self.g > self.rhs {
            Consistency::Overconsistent
        } else {
            Consistency::Underconsistent
        }
    }

    /// `min(g, rhs)`, the part of a Key that depends on the search
    pub fn min(&self) -> Cost {
        self.g.min(self.rhs)
    }
}

impl Default for Values {
    fn default() -> Values {
        Values::UNSEEN
    }
}

/// How the `g` of a Node relates to its `rhs`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Consistency {
    /// `g == rhs`: nothing to do for this Node
    Consistent,
    /// `g > rhs`: a better path through a neighbor was found, `g` can be lowered
    Overconsistent,
    /// `g < rhs`: the path `g` was based on got more expensive, `g` has to be invalidated
    Underconsistent,
}

/// Maps every touched Node to its [`Values`].
///
/// Reading a Node that is not in the store yields [`Values::UNSEEN`] without creating an entry.
/// Only writes create entries, and entries are never removed, so the store grows with the part
/// of the Grid that was explored and keeps those estimates around for the next planning cycle.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::{values::ValueStore, Node};
/// let mut store = ValueStore::new();
/// let node = Node::new(1, 1);
///
/// assert_eq!(store.g(node), f64::INFINITY);
/// assert!(!store.contains(node));
///
/// store.set_values(node, 4.0, 3.0);
/// assert_eq!(store.g(node), 4.0);
/// assert_eq!(store.rhs(node), 3.0);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ValueStore {
    values: NodeMap<Values>,
}

impl ValueStore {
    /// Creates an empty store
    pub fn new() -> ValueStore {
        ValueStore::default()
    }

    /// Creates an empty store with room for `capacity` Nodes
    pub fn with_capacity(capacity: usize) -> ValueStore {
        ValueStore {
            values: NodeMap::with_capacity(capacity),
        }
    }

    /// `g` of the Node, infinity if it was never touched
    pub fn g(&self, node: Node) -> Cost {
        self.get(node).g
    }

    /// `rhs` of the Node, infinity if it was never touched
    pub fn rhs(&self, node: Node) -> Cost {
        self.get(node).rhs
    }

    /// Both values of the Node, [`Values::UNSEEN`] if it was never touched
    pub fn get(&self, node: Node) -> Values {
        self.values.get(&node).copied().unwrap_or(Values::UNSEEN)
    }

    /// Overwrites both values of the Node, inserting it if necessary
    pub fn set_values(&mut self, node: Node, g: Cost, rhs: Cost) {
        self.values.insert(node, Values::new(g, rhs));
    }

    /// Inserts the Node as [`Values::UNSEEN`] if it is not yet in the store
    pub fn ensure(&mut self, node: Node) {
        self.values.entry(node).or_default();
    }

    /// `true` if the Node was touched by the search at some point
    pub fn contains(&self, node: Node) -> bool {
        self.values.contains_key(&node)
    }

    /// The number of touched Nodes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if no Node was touched yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all touched Nodes and their values, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (Node, Values)> + '_ {
        self.values.iter().map(|(&node, &values)| (node, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_do_not_insert() {
        let store = ValueStore::new();
        let node = Node::new(3, 3);

        assert_eq!(store.get(node), Values::UNSEEN);
        assert_eq!(store.rhs(node), Cost::INFINITY);
        assert!(store.is_empty());
    }

    #[test]
    fn set_values_overwrites() {
        let mut store = ValueStore::new();
        let node = Node::new(0, 2);

        store.set_values(node, Cost::INFINITY, 0.0);
        store.set_values(node, 2.5, 1.5);

        assert_eq!(store.get(node), Values::new(2.5, 1.5));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ensure_keeps_existing() {
        let mut store = ValueStore::new();
        let node = Node::new(1, 0);

        store.ensure(node);
        assert_eq!(store.get(node), Values::UNSEEN);
        assert!(store.contains(node));

        store.set_values(node, 1.0, 1.0);
        store.ensure(node);
        assert_eq!(store.get(node), Values::new(1.0, 1.0));
    }

    #[test]
    fn consistency() {
        assert_eq!(Values::new(1.0, 1.0).consistency(), Consistency::Consistent);
        assert_eq!(Values::UNSEEN.consistency(), Consistency::Consistent);
        assert_eq!(
            Values::new(Cost::INFINITY, 0.0).consistency(),
            Consistency::Overconsistent
        );
        assert_eq!(
            Values::new(2.0, Cost::INFINITY).consistency(),
            Consistency::Underconsistent
        );
        assert_eq!(Values::new(2.0, Cost::INFINITY).min(), 2.0);
    }
}
