use crate::ir::{BlockId, InstId, IrBuilder, OpType, ProgramGraph};

#[test]
fn result_types_follow_the_kind() {
    let mut graph = ProgramGraph::new();
    graph.create_param(OpType::Int);
    let bb = graph.create_block();
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_insert_point(bb);

    let c = builder.create_int_constant(1);
    let p = builder.create_param_load(0).unwrap();
    let add = builder.create_iadd(c, p).unwrap();
    let not = builder.create_not(add).unwrap();
    let ret = builder.create_ret(not);

    assert_eq!(graph.inst(c).ty(), OpType::Int);
    assert_eq!(graph.inst(p).ty(), OpType::Int);
    assert_eq!(graph.inst(add).ty(), OpType::Int);
    assert_eq!(graph.inst(not).ty(), OpType::Int);
    assert_eq!(graph.inst(ret).ty(), OpType::None);
    assert!(graph.inst(ret).is_terminator());
    assert!(!graph.inst(add).is_terminator());
}

#[test]
fn phi_selects_by_incoming_block() {
    let mut graph = ProgramGraph::new();
    let bb0 = graph.create_block();
    let bb1 = graph.create_block();
    let join = graph.create_block();
    let mut builder = IrBuilder::new(&mut graph);

    builder.set_insert_point(bb0);
    let a = builder.create_int_constant(1);
    builder.set_insert_point(bb1);
    let b = builder.create_int_constant(2);
    builder.set_insert_point(join);
    let phi = builder.create_phi(OpType::Int);
    builder.add_phi_option(phi, bb0, a).unwrap();
    builder.add_phi_option(phi, bb1, b).unwrap();

    assert!(graph.inst(phi).is_phi());
    assert_eq!(graph.inst(phi).phi_incoming(), &[bb0, bb1]);
    assert_eq!(graph.inst(phi).phi_value_for(bb0), Some(a));
    assert_eq!(graph.inst(phi).phi_value_for(bb1), Some(b));
    assert_eq!(graph.inst(phi).phi_value_for(BlockId(9)), None);
}

#[test]
fn cleared_input_slots_are_skipped() {
    let mut graph = ProgramGraph::new();
    let bb = graph.create_block();
    let mut builder = IrBuilder::new(&mut graph);
    builder.set_insert_point(bb);

    let a = builder.create_int_constant(1);
    let b = builder.create_int_constant(2);
    let add = builder.create_iadd(a, b).unwrap();
    builder.rm_instruction(a);

    let inst = graph.inst(add);
    assert_eq!(inst.num_inputs(), 2);
    assert_eq!(inst.input_slots(), &[None, Some(b)]);
    assert_eq!(inst.inputs().collect::<Vec<InstId>>(), vec![b]);
    assert_eq!(inst.input(0), None);
    assert_eq!(inst.input(1), Some(b));
}
