//! Population node and its time interval.

/// Index of a node in a [PopDag](crate::model::PopDag) (arena).
pub type NodeIndex = usize;

/// Maximum number of parents a node may have.
pub const MAX_PARENTS: usize = 2;

/// Maximum number of children a node may have.
pub const MAX_CHILDREN: usize = 2;

// =#========================================================================#=
// POP NODE
// =#========================================================================#=
/// A population node of a [PopDag](crate::model::PopDag).
///
/// # Invariants
/// - `index` is the position of this node in the arena
/// - `key` is unique within its DAG
/// - `two_n` and `interval` are set once, when the node is first seen
/// - at most [MAX_PARENTS] parents and [MAX_CHILDREN] children,
///   both kept in insertion order
/// - edges are only added through
///   [PopDag::add_edge](crate::model::PopDag::add_edge),
///   which keeps `parents` and `children` of both ends in sync
#[derive(PartialEq, Debug, Clone)]
pub struct PopNode {
    index: NodeIndex,
    key: String,
    two_n: f64,
    interval: Interval,
    parents: Vec<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl PopNode {
    /// Creates a new node without any edges.
    ///
    /// # Arguments
    /// * `index` - The unique index of this node in the DAG (arena)
    /// * `key` - Identity key, e.g. `0x7fff589873c8`
    /// * `two_n` - Population size parameter
    /// * `interval` - Time interval during which the population exists
    pub fn new(index: NodeIndex, key: impl Into<String>, two_n: f64, interval: Interval) -> Self {
        Self {
            index,
            key: key.into(),
            two_n,
            interval,
            parents: Vec::with_capacity(MAX_PARENTS),
            children: Vec::with_capacity(MAX_CHILDREN),
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the identity key of this node.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the population size parameter (twoN).
    pub fn two_n(&self) -> f64 {
        self.two_n
    }

    /// Returns the time interval of this node.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the parent indices, in the order the edges were added.
    pub fn parents(&self) -> &[NodeIndex] {
        &self.parents
    }

    /// Returns the child indices, in the order the edges were added.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the number of parents.
    pub fn num_parents(&self) -> usize {
        self.parents.len()
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node has two parents, i.e. populations merge into it.
    pub fn is_merge(&self) -> bool {
        self.parents.len() == MAX_PARENTS
    }

    /// Returns `true` if another parent can still be attached.
    pub fn can_add_parent(&self) -> bool {
        self.parents.len() < MAX_PARENTS
    }

    /// Returns `true` if another child can still be attached.
    pub fn can_add_child(&self) -> bool {
        self.children.len() < MAX_CHILDREN
    }

    // Only the DAG may touch edges, since it has to keep both ends consistent.
    pub(crate) fn push_parent(&mut self, parent: NodeIndex) {
        self.parents.push(parent);
    }

    pub(crate) fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }
}

// =#========================================================================#=
// INTERVAL
// =#========================================================================#=
/// Half-open time interval `[start, end)`; `end` may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    /// Creates a new interval `[start, end)`.
    pub fn new(start: f64, end: f64) -> Self {
        Interval { start, end }
    }

    /// Creates an interval `[start, ∞)`.
    pub fn unbounded(start: f64) -> Self {
        Interval {
            start,
            end: f64::INFINITY,
        }
    }

    /// Lower (inclusive) bound.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper (exclusive) bound.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns `true` if the interval has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.end == f64::INFINITY
    }

    /// Length of the interval; infinite if unbounded.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` if `t` lies in `[start, end)`.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unbounded() {
            write!(f, "({:.6},Inf)", self.start)
        } else {
            write!(f, "({:.6},{:.6})", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains_is_half_open() {
        let interval = Interval::new(1.0, 3.0);
        assert!(interval.contains(1.0));
        assert!(interval.contains(2.999));
        assert!(!interval.contains(3.0));
        assert!(!interval.contains(0.5));
    }

    #[test]
    fn test_unbounded_interval() {
        let interval = Interval::unbounded(5.5);
        assert!(interval.is_unbounded());
        assert!(interval.contains(1e300));
        assert_eq!(interval.duration(), f64::INFINITY);
        assert_eq!(interval.to_string(), "(5.500000,Inf)");
    }

    #[test]
    fn test_new_node_has_no_edges() {
        let node = PopNode::new(0, "0x7fff58987270", 96.4, Interval::new(3.0, 5.5));
        assert!(node.is_root());
        assert!(node.is_leaf());
        assert!(!node.is_merge());
        assert!(node.can_add_parent());
        assert!(node.can_add_child());
    }
}
