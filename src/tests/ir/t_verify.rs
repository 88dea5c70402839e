use crate::ir::{IrBuilder, OpType, ProgramGraph};

use super::verify_graph;

#[test]
fn accepts_a_well_formed_graph() {
    let mut graph = ProgramGraph::new();
    let bb0 = graph.create_block();
    let bb1 = graph.create_block();
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_entry_point(bb0);
    builder.set_insert_point(bb0);
    let c = builder.create_int_constant(1);
    builder.create_branch(bb1);
    builder.set_insert_point(bb1);
    builder.create_ret(c);

    verify_graph(&graph).unwrap();
}

#[test]
fn rejects_an_entry_with_predecessors() {
    let mut graph = ProgramGraph::new();
    let bb0 = graph.create_block();
    let bb1 = graph.create_block();
    graph.set_uncond_successor(bb0, bb1);
    graph.set_entry(bb1);

    let err = verify_graph(&graph).unwrap_err();
    assert!(err.to_string().contains("predecessors"));
}

#[test]
fn rejects_a_non_tail_terminator() {
    let mut graph = ProgramGraph::new();
    let bb0 = graph.create_block();
    let bb1 = graph.create_block();
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_entry_point(bb0);
    builder.set_insert_point(bb0);
    builder.create_branch(bb1);
    // Appending past the terminator leaves it in the middle of the list.
    builder.create_int_constant(1);

    let err = verify_graph(&graph).unwrap_err();
    assert!(err.to_string().contains("terminator"));
}

#[test]
fn rejects_a_phi_missing_a_predecessor() {
    let mut graph = ProgramGraph::new();
    let bb0 = graph.create_block();
    let bb1 = graph.create_block();
    let join = graph.create_block();
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_entry_point(bb0);
    builder.set_insert_point(bb0);
    let a = builder.create_int_constant(1);
    builder.create_branch(join);
    builder.set_insert_point(bb1);
    builder.create_branch(join);
    builder.set_insert_point(join);
    let phi = builder.create_phi(OpType::Int);
    builder.add_phi_option(phi, bb0, a).unwrap();

    let err = verify_graph(&graph).unwrap_err();
    assert!(err.to_string().contains("phi"));
}
