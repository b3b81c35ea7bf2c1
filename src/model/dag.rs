//! Provides the population DAG.
//!
//! [PopDag] owns all [PopNode]s of one parsed trace (arena pattern) together
//! with the registry mapping identity keys to arena indices. Parent and child
//! references are plain [NodeIndex] values into the arena, so shared nodes
//! (two parents) need no reference counting.

use crate::model::node::{Interval, MAX_CHILDREN, MAX_PARENTS, NodeIndex, PopNode};
use crate::parser::parsing_error::ParsingErrorType;
use std::collections::HashMap;
use tracing::trace;

// =$========================================================================$=
// POP DAG
// =$========================================================================$=
/// A DAG of population nodes, each with at most two parents and two children.
///
/// # Structure
/// - All nodes are stored in the arena in the order they were first seen.
/// - The registry maps each identity key to exactly one arena index.
/// - Edges are only added via [`add_edge`](Self::add_edge), which enforces
///   the cardinality bounds and keeps both ends consistent.
///
/// # Example
/// ```
/// use popdag::model::{Interval, PopDag};
///
/// let mut dag = PopDag::new();
/// let root = dag.insert_node("0x7fff589873c8", 120.0, Interval::unbounded(5.5));
/// let child = dag.insert_node("0x7fff58987270", 96.4, Interval::new(3.0, 5.5));
/// dag.add_edge(root, child).unwrap();
///
/// assert_eq!(dag[child].parents(), &[root]);
/// assert_eq!(dag[root].children(), &[child]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PopDag {
    /// Nodes of this DAG (arena pattern)
    nodes: Vec<PopNode>,

    /// Identity key to arena index
    registry: HashMap<String, NodeIndex>,
}

/// An edge whose child interval does not end where the parent interval starts.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalMismatch {
    pub parent: NodeIndex,
    pub child: NodeIndex,
    pub parent_start: f64,
    pub child_end: f64,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PopDag {
    /// Creates an empty DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty DAG with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            registry: HashMap::with_capacity(capacity),
        }
    }

    /// Adds a node without edges, assigning a unique index, which gets returned.
    ///
    /// If a node with the same key already exists, nothing changes and the
    /// index of the existing node is returned; its payload stays as first seen.
    ///
    /// # Arguments
    /// * `key` - Identity key of the node
    /// * `two_n` - Population size parameter
    /// * `interval` - Time interval of the node
    pub fn insert_node(&mut self, key: &str, two_n: f64, interval: Interval) -> NodeIndex {
        if let Some(&index) = self.registry.get(key) {
            return index;
        }

        let index = self.nodes.len();
        self.nodes.push(PopNode::new(index, key, two_n, interval));
        self.registry.insert(key.to_string(), index);
        index
    }

    /// Attaches `parent` as an additional parent of `child`.
    ///
    /// Both cardinality bounds are checked before anything changes, so on
    /// error neither node is modified.
    ///
    /// # Errors
    /// * [ParsingErrorType::TooManyParents] if `child` already has two parents
    /// * [ParsingErrorType::TooManyChildren] if `parent` already has two children
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn add_edge(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<(), ParsingErrorType> {
        if !self.nodes[child].can_add_parent() {
            return Err(ParsingErrorType::TooManyParents {
                key: self.nodes[child].key().to_string(),
            });
        }
        if !self.nodes[parent].can_add_child() {
            return Err(ParsingErrorType::TooManyChildren {
                key: self.nodes[parent].key().to_string(),
            });
        }

        self.nodes[child].push_parent(parent);
        self.nodes[parent].push_child(child);
        trace!(
            parent_key = self.nodes[parent].key(),
            child_key = self.nodes[child].key(),
            "added edge"
        );
        Ok(())
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the DAG has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of (parent, child) edges.
    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(PopNode::num_children).sum()
    }

    /// Returns `true` if a node with the given key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.registry.contains_key(key)
    }

    /// Returns the arena index of the node with the given key.
    pub fn index_of(&self, key: &str) -> Option<NodeIndex> {
        self.registry.get(key).copied()
    }

    /// Returns the node with the given key.
    pub fn get(&self, key: &str) -> Option<&PopNode> {
        self.index_of(key).map(|index| &self.nodes[index])
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &PopNode {
        &self[index]
    }

    /// Returns the key of the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn key_of(&self, index: NodeIndex) -> &str {
        self.nodes[index].key()
    }

    /// Iterates over all nodes in the order they were first seen.
    pub fn iter(&self) -> impl Iterator<Item = &PopNode> {
        self.nodes.iter()
    }

    /// Iterates over all keys in the order they were first seen.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(PopNode::key)
    }

    /// Returns all nodes without parents.
    pub fn roots(&self) -> Vec<&PopNode> {
        self.nodes.iter().filter(|node| node.is_root()).collect()
    }

    /// Returns all nodes without children.
    pub fn leaves(&self) -> Vec<&PopNode> {
        self.nodes.iter().filter(|node| node.is_leaf()).collect()
    }

    /// Returns all nodes with two parents.
    pub fn merges(&self) -> Vec<&PopNode> {
        self.nodes.iter().filter(|node| node.is_merge()).collect()
    }
}

// ============================================================================
// Consistency checks (pub)
// ============================================================================
impl PopDag {
    /// Validates the DAG structure and all index references.
    ///
    /// Checks:
    /// - All node indices match their position in the arena
    /// - The registry maps every key to the node holding it, and nothing else
    /// - No node has more than two parents or two children
    /// - All parent and child indices are in bounds
    /// - Edge symmetry: `b` is a child of `a` iff `a` is a parent of `b`
    ///
    /// # Returns
    /// `true` if the DAG is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.registry.len() != self.nodes.len() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.index() != index {
                return false;
            }

            if self.registry.get(node.key()) != Some(&index) {
                return false;
            }

            if node.num_parents() > MAX_PARENTS || node.num_children() > MAX_CHILDREN {
                return false;
            }

            for &child in node.children() {
                match self.nodes.get(child) {
                    Some(c) if c.parents().contains(&index) => {}
                    _ => return false,
                }
            }

            for &parent in node.parents() {
                match self.nodes.get(parent) {
                    Some(p) if p.children().contains(&index) => {}
                    _ => return false,
                }
            }
        }

        true
    }

    /// Collects every edge whose child does not end when its parent starts.
    ///
    /// In a population history a child population is replaced by its parent
    /// at the parent's start time, so `child.end == parent.start` is expected.
    /// Mismatches are reported, never rejected.
    pub fn interval_mismatches(&self) -> Vec<IntervalMismatch> {
        let mut mismatches = Vec::new();
        for parent in &self.nodes {
            for &child in parent.children() {
                let parent_start = parent.interval().start();
                let child_end = self.nodes[child].interval().end();
                if parent_start != child_end {
                    mismatches.push(IntervalMismatch {
                        parent: parent.index(),
                        child,
                        parent_start,
                        child_end,
                    });
                }
            }
        }
        mismatches
    }
}

impl std::ops::Index<NodeIndex> for PopDag {
    type Output = PopNode;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}
