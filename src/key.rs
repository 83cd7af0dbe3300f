//! Priorities of Nodes in the Frontier

use crate::Cost;
use std::cmp::Ordering;

/// Relative tolerance under which two Key components count as equal
pub const KEY_EPSILON: Cost = 1e-9;

/// The priority of a Node in the [`Frontier`](crate::frontier::Frontier).
///
/// `k1` is the heuristic-adjusted bound `min(g, rhs) + h(node, start) + k_m`, `k2` is the
/// tie-breaker `min(g, rhs)`. Keys are compared lexicographically, with differences below
/// [`KEY_EPSILON`] ignored so that two sums of the same edge costs in a different order
/// still tie. Infinity is never within tolerance of a finite value.
///
/// `Key` also implements [`Ord`], an exact total order over both components (as defined by
/// [`f64::total_cmp`]) which keeps the heap of the Frontier well-formed. The operators `<`, `>`
/// use that exact order, [`less_than`](Key::less_than) is the tolerant one the Planner decides
/// with.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::Key;
/// let a = Key::new(3.0, 1.0);
/// let b = Key::new(3.0, 2.0);
///
/// assert!(a.less_than(&b));
/// assert!(!b.less_than(&a));
/// assert!(b.less_than(&Key::INFINITE));
///
/// // floating point noise is not an ordering
/// let c = Key::new(0.1 + 0.2, 1.0);
/// let d = Key::new(0.3, 1.0);
/// assert!(!c.less_than(&d) && !d.less_than(&c));
/// ```
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    /// the primary component
    pub k1: Cost,
    /// the secondary component, used on ties of `k1`
    pub k2: Cost,
}

impl Key {
    /// The Key of an empty Frontier. No Key is less than it.
    pub const INFINITE: Key = Key {
        k1: Cost::INFINITY,
        k2: Cost::INFINITY,
    };

    /// Creates a Key from its two components
    pub const fn new(k1: Cost, k2: Cost) -> Key {
        Key { k1, k2 }
    }

    /// Strict lexicographic comparison with tolerance
    pub fn less_than(&self, other: &Key) -> bool {
        if !approx_eq(self.k1, other.k1) {
            self.k1 < other.k1
        } else if !approx_eq(self.k2, other.k2) {
            self.k2 < other.k2
        } else {
            false
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Key) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Key) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Key) -> Ordering {
        self.k1
            .total_cmp(&other.k1)
            .then_with(|| self.k2.total_cmp(&other.k2))
    }
}

fn approx_eq(a: Cost, b: Cost) -> bool {
    // a == b covers inf == inf; a finite value is never close to infinity
    a == b
        || (a.is_finite()
            && b.is_finite()
            && (a - b).abs() <= KEY_EPSILON * a.abs().max(b.abs()).max(1.0))
}

use std::fmt;
impl fmt::Display for Key {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "<{}, {}>", self.k1, self.k2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic() {
        assert!(Key::new(1.0, 9.0).less_than(&Key::new(2.0, 0.0)));
        assert!(Key::new(2.0, 0.0).less_than(&Key::new(2.0, 1.0)));
        assert!(!Key::new(2.0, 1.0).less_than(&Key::new(2.0, 1.0)));
        assert!(!Key::new(3.0, 0.0).less_than(&Key::new(2.0, 5.0)));
    }

    #[test]
    fn infinite() {
        assert!(!Key::INFINITE.less_than(&Key::INFINITE));
        assert!(Key::new(1e30, 1e30).less_than(&Key::INFINITE));
        assert!(!Key::INFINITE.less_than(&Key::new(0.0, 0.0)));
        // an unreachable Node still orders by k2 once k1 ties at infinity
        assert!(Key::new(Cost::INFINITY, 3.0).less_than(&Key::INFINITE));
    }

    #[test]
    fn finite_is_below_infinite() {
        for key in [Key::new(0.0, 0.0), Key::new(5.0, 5.0), Key::new(1e300, 1e300)] {
            assert!(key.less_than(&Key::INFINITE), "{}", key);
            assert!(!Key::INFINITE.less_than(&key), "{}", key);
        }
        assert!(Key::new(5.0, 5.0).less_than(&Key::new(Cost::INFINITY, 0.0)));
        assert!(Key::new(5.0, 1.0).less_than(&Key::new(5.0, Cost::INFINITY)));
    }

    #[test]
    fn tolerance() {
        let sum = (0..10).map(|_| 0.1).sum::<Cost>();
        assert!(!Key::new(sum, 0.0).less_than(&Key::new(1.0, 0.0)));
        assert!(!Key::new(1.0, 0.0).less_than(&Key::new(sum, 0.0)));
        assert!(Key::new(1.0, 0.0).less_than(&Key::new(1.0 + 1e-6, 0.0)));
    }

    #[test]
    fn total_order() {
        let mut keys = vec![
            Key::INFINITE,
            Key::new(2.0, 1.0),
            Key::new(1.0, 5.0),
            Key::new(2.0, 0.5),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                Key::new(1.0, 5.0),
                Key::new(2.0, 0.5),
                Key::new(2.0, 1.0),
                Key::INFINITE
            ]
        );
        assert!(Key::new(1.0, 5.0) < Key::new(1.0 + 1e-12, 0.0));
        assert_eq!(Key::new(2.0, 1.0).cmp(&Key::new(2.0, 1.0)), Ordering::Equal);
        assert_eq!(Key::INFINITE, Key::new(Cost::INFINITY, Cost::INFINITY));
    }
}
