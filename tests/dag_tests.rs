use popdag::model::{Interval, MAX_CHILDREN, MAX_PARENTS, PopDag, PopNode};
use popdag::parser::ParsingErrorType;

fn key(i: usize) -> String {
    format!("0x{i:012x}")
}

// ============= Node Tests =============
#[test]
fn test_node_accessors() {
    let node = PopNode::new(3, "0x7fff58987118", 32.1, Interval::new(1.0, 3.0));
    assert_eq!(node.index(), 3);
    assert_eq!(node.key(), "0x7fff58987118");
    assert_eq!(node.two_n(), 32.1);
    assert_eq!(node.interval().duration(), 2.0);
    assert!(node.parents().is_empty());
    assert!(node.children().is_empty());
}

// ============= DAG Construction Tests =============
#[test]
fn test_empty_dag() {
    let dag = PopDag::new();
    assert!(dag.is_empty());
    assert_eq!(dag.num_edges(), 0);
    assert!(dag.roots().is_empty());
    assert!(dag.is_valid());
}

#[test]
fn test_lookup_by_key_and_index() {
    let mut dag = PopDag::with_capacity(2);
    let a = dag.insert_node(&key(1), 10.0, Interval::unbounded(1.0));
    let b = dag.insert_node(&key(2), 20.0, Interval::new(0.0, 1.0));

    assert_eq!(dag.index_of(&key(1)), Some(a));
    assert_eq!(dag.get(&key(2)).map(PopNode::index), Some(b));
    assert_eq!(dag.node(b).two_n(), 20.0);
    assert!(dag.contains_key(&key(2)));
    assert!(!dag.contains_key(&key(3)));
    assert_eq!(dag.get(&key(3)), None);
}

#[test]
fn test_diamond_is_valid() {
    // top -> (left, right) -> bottom
    let mut dag = PopDag::new();
    let top = dag.insert_node(&key(0), 1.0, Interval::unbounded(2.0));
    let left = dag.insert_node(&key(1), 1.0, Interval::new(1.0, 2.0));
    let right = dag.insert_node(&key(2), 1.0, Interval::new(1.0, 2.0));
    let bottom = dag.insert_node(&key(3), 1.0, Interval::new(0.0, 1.0));
    dag.add_edge(top, left).unwrap();
    dag.add_edge(top, right).unwrap();
    dag.add_edge(left, bottom).unwrap();
    dag.add_edge(right, bottom).unwrap();

    assert!(dag.is_valid());
    assert_eq!(dag.num_edges(), 4);
    assert_eq!(dag.roots().len(), 1);
    assert_eq!(dag.leaves().len(), 1);
    assert_eq!(dag.merges().len(), 1);
    assert!(dag.interval_mismatches().is_empty());
}

#[test]
fn test_edge_symmetry() {
    let mut dag = PopDag::new();
    let indices: Vec<_> = (0..5)
        .map(|i| dag.insert_node(&key(i), 1.0, Interval::new(0.0, 1.0)))
        .collect();
    dag.add_edge(indices[0], indices[1]).unwrap();
    dag.add_edge(indices[0], indices[2]).unwrap();
    dag.add_edge(indices[1], indices[3]).unwrap();
    dag.add_edge(indices[2], indices[3]).unwrap();
    dag.add_edge(indices[3], indices[4]).unwrap();

    for a in dag.iter() {
        for b in dag.iter() {
            assert_eq!(
                a.children().contains(&b.index()),
                b.parents().contains(&a.index())
            );
        }
    }
}

#[test]
fn test_cardinality_bounds() {
    let mut dag = PopDag::new();
    let hub = dag.insert_node(&key(100), 1.0, Interval::new(0.0, 1.0));
    for i in 0..MAX_CHILDREN {
        let child = dag.insert_node(&key(i), 1.0, Interval::new(0.0, 1.0));
        dag.add_edge(hub, child).unwrap();
    }
    let extra = dag.insert_node(&key(50), 1.0, Interval::new(0.0, 1.0));
    assert!(matches!(
        dag.add_edge(hub, extra),
        Err(ParsingErrorType::TooManyChildren { .. })
    ));

    let sink = dag.insert_node(&key(200), 1.0, Interval::new(0.0, 1.0));
    for i in 0..MAX_PARENTS {
        let parent = dag.insert_node(&key(300 + i), 1.0, Interval::new(0.0, 1.0));
        dag.add_edge(parent, sink).unwrap();
    }
    assert!(matches!(
        dag.add_edge(extra, sink),
        Err(ParsingErrorType::TooManyParents { .. })
    ));
    assert!(dag.is_valid());
}
