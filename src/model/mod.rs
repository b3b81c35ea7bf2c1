//! Data model for population DAGs.
//!
//! # DAG representation
//! A parsed trace is represented by [PopDag], which uses the arena pattern to
//! store [PopNode]s, referenced by [NodeIndex]. A node has at most two parents
//! (a merge of two populations) and at most two children (a split).
//!
//! Each node carries:
//! - an identity key (the address-like token of the trace line),
//! - a population size parameter `twoN`,
//! - a half-open time [Interval], possibly unbounded above.
//!
//! # Building DAGs
//! DAGs are typically constructed by [TraceParser](crate::trace::TraceParser),
//! but [`PopDag::insert_node`] and [`PopDag::add_edge`] can be used directly.

pub mod dag;
pub mod node;

pub use dag::IntervalMismatch;
pub use dag::PopDag;
pub use node::Interval;
pub use node::NodeIndex;
pub use node::PopNode;
pub use node::{MAX_CHILDREN, MAX_PARENTS};
