use std::collections::HashSet;

use crate::ir::{BlockId, IrBuilder, ProgramGraph};

use super::DomTree;

include!("../util.rs");

#[test]
fn diamond_with_preheader() {
    let mut graph = ProgramGraph::new();
    let bbs = blocks(&mut graph, 5);
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_entry_point(bbs[4]);
    connect(&mut builder, bbs[4], bbs[0]);
    connect_cond(&mut builder, bbs[0], bbs[1], bbs[2]);
    connect(&mut builder, bbs[1], bbs[3]);
    connect(&mut builder, bbs[2], bbs[3]);

    let doms = DomTree::compute(&graph);
    for &bb in &bbs {
        assert!(doms.contains(bb));
    }

    assert!(doms.is_dominator_of(bbs[4], bbs[0]));
    assert!(doms.is_dominator_of(bbs[0], bbs[1]));
    assert!(doms.is_dominator_of(bbs[0], bbs[2]));
    assert!(doms.is_dominator_of(bbs[0], bbs[3]));

    assert!(!doms.is_dominator_of(bbs[1], bbs[3]));
    assert!(!doms.is_dominator_of(bbs[2], bbs[3]));
    assert!(!doms.is_dominator_of(bbs[2], bbs[1]));

    let expected: HashSet<BlockId> = [bbs[0], bbs[4]].into_iter().collect();
    assert_eq!(doms.dominators(bbs[3]), &expected);
    assert!(doms.dominators(bbs[4]).is_empty());
    assert_eq!(doms.root(), Some(bbs[4]));
}

fn assert_idoms(doms: &DomTree, expected: &[(usize, usize)]) {
    for &(node, idom) in expected {
        assert_eq!(
            doms.immediate_dominator(BlockId(node as u32)),
            Some(BlockId(idom as u32)),
            "idom of bb{}",
            node
        );
    }
}

#[test]
fn nested_branches() {
    // 1 -> 2 -> {3, 6}; 3 -> 4; 6 -> {5, 7}; 5 -> 4; 7 -> 4.
    let mut graph = ProgramGraph::new();
    let bbs = blocks(&mut graph, 8);
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_entry_point(bbs[1]);
    connect(&mut builder, bbs[1], bbs[2]);
    connect_cond(&mut builder, bbs[2], bbs[3], bbs[6]);
    connect(&mut builder, bbs[3], bbs[4]);
    connect_cond(&mut builder, bbs[6], bbs[5], bbs[7]);
    connect(&mut builder, bbs[5], bbs[4]);
    connect(&mut builder, bbs[7], bbs[4]);

    let doms = DomTree::compute(&graph);
    assert!(!doms.contains(bbs[0]));
    assert_idoms(&doms, &[(2, 1), (3, 2), (4, 2), (6, 2), (5, 6), (7, 6)]);
}

#[test]
fn loop_with_early_exits() {
    // The outer cycle 2 -> .. -> 9 -> 2 plus two small inner cycles.
    let mut graph = ProgramGraph::new();
    let bbs = blocks(&mut graph, 12);
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_entry_point(bbs[1]);
    connect(&mut builder, bbs[1], bbs[2]);
    connect_cond(&mut builder, bbs[2], bbs[3], bbs[4]);
    connect(&mut builder, bbs[3], bbs[5]);
    connect(&mut builder, bbs[4], bbs[3]);
    connect_cond(&mut builder, bbs[5], bbs[3], bbs[6]);
    connect(&mut builder, bbs[6], bbs[7]);
    connect_cond(&mut builder, bbs[7], bbs[6], bbs[8]);
    connect_cond(&mut builder, bbs[8], bbs[9], bbs[10]);
    connect(&mut builder, bbs[9], bbs[2]);
    connect(&mut builder, bbs[10], bbs[11]);

    let doms = DomTree::compute(&graph);
    assert_idoms(
        &doms,
        &[
            (2, 1),
            (3, 2),
            (4, 2),
            (5, 3),
            (6, 5),
            (7, 6),
            (8, 7),
            (9, 8),
            (10, 8),
            (11, 10),
        ],
    );
}

#[test]
fn irreducible_region() {
    let mut graph = ProgramGraph::new();
    let bbs = blocks(&mut graph, 10);
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_entry_point(bbs[1]);
    connect(&mut builder, bbs[1], bbs[2]);
    connect_cond(&mut builder, bbs[2], bbs[5], bbs[3]);
    connect(&mut builder, bbs[3], bbs[4]);
    connect(&mut builder, bbs[4], bbs[7]);
    connect_cond(&mut builder, bbs[5], bbs[4], bbs[6]);
    connect_cond(&mut builder, bbs[6], bbs[8], bbs[2]);
    connect_cond(&mut builder, bbs[7], bbs[9], bbs[3]);
    connect_cond(&mut builder, bbs[8], bbs[7], bbs[9]);

    let doms = DomTree::compute(&graph);
    assert_idoms(
        &doms,
        &[
            (2, 1),
            (3, 2),
            (4, 2),
            (5, 2),
            (7, 2),
            (9, 2),
            (6, 5),
            (8, 6),
        ],
    );
}
