use crate::Cost;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc as Arc;

/// A Path through the Grid
///
/// Stores the sequence of visited Points, first to last, and the total Cost of walking them.
/// Cloning a Path is cheap, since the Points are shared.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::Path;
/// let path = Path::new(vec![(0, 0), (1, 1), (2, 1)], 2.5);
///
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[1], (1, 1));
/// assert_eq!(path.cost(), 2.5);
/// assert_eq!(path, vec![(0, 0), (1, 1), (2, 1)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    path: Arc<[P]>,
    cost: Cost,
}

impl<P> Path<P> {
    /// creates a new Path with the given sequence of Points and total Cost
    pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
        Path {
            path: path.into(),
            cost,
        }
    }

    /// creates a new Path by copying the given sequence of Points
    pub fn from_slice(path: &[P], cost: Cost) -> Path<P>
    where
        P: Clone,
    {
        Path {
            path: path.into(),
            cost,
        }
    }

    /// the total Cost of the Path
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// the number of Points in the Path, including the first one
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// `true` if the Path has no Points at all
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// the first Point of the Path
    pub fn first(&self) -> Option<&P> {
        self.path.first()
    }

    /// the last Point of the Path
    pub fn last(&self) -> Option<&P> {
        self.path.last()
    }

    /// Returns an Iterator over the Path
    pub fn iter(&self) -> std::slice::Iter<P> {
        self.path.iter()
    }

    /// The Points of the Path as a slice
    pub fn as_slice(&self) -> &[P] {
        &self.path
    }
}

use std::ops::Index;

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.path[index]
    }
}

impl<'a, P> IntoIterator for &'a Path<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
    fn eq(&self, rhs: &Vec<P>) -> bool {
        self.path[..] == rhs[..]
    }
}

impl<'a, P: PartialEq> PartialEq<&'a [P]> for Path<P> {
    fn eq(&self, rhs: &&'a [P]) -> bool {
        self.path[..] == rhs[..]
    }
}

use std::fmt;
impl<P: fmt::Debug> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{:?}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " -> {:?}", p)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {

    use super::Path;
    #[test]
    fn index() {
        let path = Path::new(vec![4, 2, 0], 42.0);

        assert_eq!(path[0], 4);
        assert_eq!(path[1], 2);
        assert_eq!(path[2], 0);
    }

    #[test]
    fn display() {
        let path = Path::new(vec![(0, 0), (1, 1)], 1.5);

        assert_eq!(&format!("{}", path), "Path[Cost = 1.5]: (0, 0) -> (1, 1)");
    }

    #[test]
    fn display_empty() {
        let path = Path::new(Vec::<i32>::new(), 0.0);

        assert_eq!(&format!("{}", path), "Path[Cost = 0]: <empty>");
    }
}
