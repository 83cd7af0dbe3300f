//! The priority queue of locally inconsistent Nodes

use crate::{node::NodeMap, Key, Node};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug)]
struct Entry {
    node: Node,
    key: Key,
    seq: u64,
}

impl Entry {
    /// `true` if `self` has to be popped before `other`
    fn precedes(&self, other: &Entry) -> bool {
        match self.key.cmp(&other.key) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.seq < other.seq,
        }
    }
}

/// A binary min-heap of Nodes ordered by their [`Key`], with a side table from Node to heap
/// slot so that any Node can be re-keyed or removed in `O(log n)`, not just the minimum.
///
/// Every Node is present at most once. Nodes with identical Keys are popped in the order
/// they were (re-)inserted, which keeps searches reproducible.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::{frontier::Frontier, Key, Node};
/// let mut frontier = Frontier::new();
/// assert_eq!(frontier.top_key(), Key::INFINITE);
///
/// frontier.insert(Node::new(0, 0), Key::new(4.0, 2.0));
/// frontier.insert(Node::new(1, 1), Key::new(3.0, 3.0));
/// frontier.insert(Node::new(2, 2), Key::new(5.0, 0.0));
///
/// frontier.remove(Node::new(1, 1));
///
/// assert_eq!(frontier.top_key(), Key::new(4.0, 2.0));
/// assert_eq!(frontier.pop(), Some((Node::new(0, 0), Key::new(4.0, 2.0))));
/// assert_eq!(frontier.pop(), Some((Node::new(2, 2), Key::new(5.0, 0.0))));
/// assert_eq!(frontier.pop(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: Vec<Entry>,
    positions: NodeMap<usize>,
    next_seq: u64,
}

impl Frontier {
    /// Creates an empty Frontier
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// The number of queued Nodes
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `true` if no Node is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// `true` if the Node is queued
    pub fn contains(&self, node: Node) -> bool {
        self.positions.contains_key(&node)
    }

    /// The Key the Node is queued under, if it is queued
    pub fn key_of(&self, node: Node) -> Option<Key> {
        self.positions.get(&node).map(|&pos| self.heap[pos].key)
    }

    /// Queues the Node under `key`.
    ///
    /// A Node that is already queued is moved to `key` instead of being added a second time,
    /// and counts as freshly inserted for tie-breaking.
    pub fn insert(&mut self, node: Node, key: Key) {
        let entry = Entry {
            node,
            key,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        if let Some(&pos) = self.positions.get(&node) {
            let old = std::mem::replace(&mut self.heap[pos], entry);
            if entry.precedes(&old) {
                self.sift_up(pos);
            } else {
                self.sift_down(pos);
            }
        } else {
            self.heap.push(entry);
            let pos = self.heap.len() - 1;
            self.positions.insert(node, pos);
            self.sift_up(pos);
        }
    }

    /// Removes the Node, returning the Key it was queued under. Does nothing if it is not queued.
    pub fn remove(&mut self, node: Node) -> Option<Key> {
        let pos = self.positions.get(&node).copied()?;
        self.remove_at(pos).map(|entry| entry.key)
    }

    /// The smallest queued Key, or [`Key::INFINITE`] if the Frontier is empty
    pub fn top_key(&self) -> Key {
        self.heap.first().map_or(Key::INFINITE, |entry| entry.key)
    }

    /// The Node with the smallest Key, without removing it
    pub fn top_node(&self) -> Option<Node> {
        self.heap.first().map(|entry| entry.node)
    }

    /// Removes and returns the Node with the smallest Key, together with that Key
    pub fn pop(&mut self) -> Option<(Node, Key)> {
        self.remove_at(0).map(|entry| (entry.node, entry.key))
    }

    /// Removes every Node
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Iterates over the queued Nodes and their Keys in heap order, not sorted
    pub fn iter(&self) -> impl Iterator<Item = (Node, Key)> + '_ {
        self.heap.iter().map(|entry| (entry.node, entry.key))
    }

    fn remove_at(&mut self, pos: usize) -> Option<Entry> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(pos, last);
        let entry = self.heap.pop()?;
        self.positions.remove(&entry.node);

        if pos < self.heap.len() {
            if pos > 0 && self.heap[pos].precedes(&self.heap[(pos - 1) / 2]) {
                self.sift_up(pos);
            } else {
                self.sift_down(pos);
            }
        }
        Some(entry)
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.heap[pos].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].node, a);
        self.positions.insert(self.heap[b].node, b);
    }
}
