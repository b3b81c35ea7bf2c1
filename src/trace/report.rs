//! Human-readable diagnostic output for parsed traces.
//!
//! Nothing here is meant to be read back in; the formats only serve
//! inspection on a terminal.
//!
//! # Example Output
//! ```text
//!    0x7fff58987118 twoN=32.100000 ntrval=(1.000000,3.000000)
//! depth: 1
//! 0x7fff58987118 twoN=32.100000 ntrval=(1.000000,3.000000) parents=[0x7fff58987270] children=[]
//! ```

use crate::model::{NodeIndex, PopDag};
use crate::trace::parser::ParseStep;
use std::fmt;

/// Displays a node's payload and the keys of its parents and children.
pub struct NodeReport<'a> {
    dag: &'a PopDag,
    index: NodeIndex,
}

impl<'a> NodeReport<'a> {
    pub fn new(dag: &'a PopDag, index: NodeIndex) -> Self {
        Self { dag, index }
    }

    fn write_keys(&self, f: &mut fmt::Formatter<'_>, indices: &[NodeIndex]) -> fmt::Result {
        write!(f, "[")?;
        for (i, &index) in indices.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", self.dag.key_of(index))?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for NodeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.dag[self.index];
        write!(
            f,
            "{} twoN={:.6} ntrval={} parents=",
            node.key(),
            node.two_n(),
            node.interval()
        )?;
        self.write_keys(f, node.parents())?;
        write!(f, " children=")?;
        self.write_keys(f, node.children())
    }
}

/// Displays the block printed for one parsed line: the raw line,
/// its depth and the resulting node state.
pub struct StepReport<'a> {
    dag: &'a PopDag,
    step: ParseStep,
    line: &'a str,
}

impl<'a> StepReport<'a> {
    pub fn new(dag: &'a PopDag, step: ParseStep, line: &'a str) -> Self {
        Self { dag, step, line }
    }
}

impl fmt::Display for StepReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.line)?;
        writeln!(f, "depth: {}", self.step.depth)?;
        write!(f, "{}", NodeReport::new(self.dag, self.step.node))
    }
}

/// Displays a summary followed by every key and its node, in first-seen order.
pub struct DagReport<'a> {
    dag: &'a PopDag,
}

impl<'a> DagReport<'a> {
    pub fn new(dag: &'a PopDag) -> Self {
        Self { dag }
    }
}

impl fmt::Display for DagReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} nodes, {} edges, {} root(s), {} leaves, {} merge(s)",
            self.dag.len(),
            self.dag.num_edges(),
            self.dag.roots().len(),
            self.dag.leaves().len(),
            self.dag.merges().len()
        )?;
        for node in self.dag.iter() {
            writeln!(f, "{}", node.key())?;
            writeln!(f, "  {}", NodeReport::new(self.dag, node.index()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Interval;

    #[test]
    fn test_node_report_lists_edges() {
        let mut dag = PopDag::new();
        let root = dag.insert_node("0x7fff589873c8", 120.0, Interval::unbounded(5.5));
        let child = dag.insert_node("0x7fff58987270", 96.4, Interval::new(3.0, 5.5));
        dag.add_edge(root, child).unwrap();

        assert_eq!(
            NodeReport::new(&dag, root).to_string(),
            "0x7fff589873c8 twoN=120.000000 ntrval=(5.500000,Inf) parents=[] children=[0x7fff58987270]"
        );
        assert_eq!(
            NodeReport::new(&dag, child).to_string(),
            "0x7fff58987270 twoN=96.400000 ntrval=(3.000000,5.500000) parents=[0x7fff589873c8] children=[]"
        );
    }

    #[test]
    fn test_dag_report_summary() {
        let mut dag = PopDag::new();
        dag.insert_node("0x7fff589873c8", 120.0, Interval::unbounded(5.5));
        let report = DagReport::new(&dag).to_string();
        assert!(report.starts_with("1 nodes, 0 edges, 1 root(s), 1 leaves, 0 merge(s)\n"));
        assert!(report.contains("\n0x7fff589873c8\n"));
    }
}
