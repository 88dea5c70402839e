use crate::compiler::Compiler;
use crate::ir::IrBuilder;
use crate::opt::RmUnused;

#[test]
fn drops_pure_instructions_without_users() {
    let mut comp = Compiler::new();
    comp.register_pass(RmUnused);
    let bb0 = comp.graph_mut().create_block();
    let mut builder = IrBuilder::new(comp.graph_mut());
    builder.set_entry_point(bb0);
    builder.set_insert_point(bb0);
    let used = builder.create_int_constant(1);
    let dead = builder.create_int_constant(2);
    let ret = builder.create_ret(used);

    comp.run_all_passes();

    let graph = comp.graph();
    let order: Vec<_> = graph.block_insts(bb0).collect();
    assert_eq!(order, vec![used, ret]);
    assert_eq!(graph.inst(dead).block(), None);
}

#[test]
fn keeps_terminators_without_users() {
    let mut comp = Compiler::new();
    comp.register_pass(RmUnused);
    let bb0 = comp.graph_mut().create_block();
    let bb1 = comp.graph_mut().create_block();
    let mut builder = IrBuilder::new(comp.graph_mut());
    builder.set_entry_point(bb0);
    builder.set_insert_point(bb0);
    let br = builder.create_branch(bb1);
    // The branch is mid-list once something lands behind it, and must
    // still survive the sweep.
    builder.create_int_constant(5);

    comp.run_all_passes();

    assert_eq!(comp.graph().block(bb0).first_inst(), Some(br));
}

#[test]
fn the_block_tail_is_never_removed() {
    let mut comp = Compiler::new();
    comp.register_pass(RmUnused);
    let bb0 = comp.graph_mut().create_block();
    let mut builder = IrBuilder::new(comp.graph_mut());
    builder.set_entry_point(bb0);
    builder.set_insert_point(bb0);
    let a = builder.create_int_constant(1);
    let b = builder.create_int_constant(2);
    let add = builder.create_iadd(a, b).unwrap();

    comp.run_all_passes();

    // a and b feed the (unused) tail computation; only the tail exemption
    // keeps the whole block alive.
    let graph = comp.graph();
    let order: Vec<_> = graph.block_insts(bb0).collect();
    assert_eq!(order, vec![a, b, add]);
}

#[test]
fn removal_cascades_along_the_sweep_direction() {
    let mut comp = Compiler::new();
    comp.register_pass(RmUnused);
    let bb0 = comp.graph_mut().create_block();
    let mut builder = IrBuilder::new(comp.graph_mut());
    builder.set_entry_point(bb0);
    builder.set_insert_point(bb0);
    let keep = builder.create_int_constant(1);
    let dead1 = builder.create_int_constant(2);
    let dead2 = builder.create_iadd(dead1, dead1).unwrap();
    let ret = builder.create_ret(keep);

    comp.run_all_passes();

    // dead2 keeps dead1 alive when the sweep passes it, but falls itself;
    // a second run would then collect dead1.
    let graph = comp.graph();
    let order: Vec<_> = graph.block_insts(bb0).collect();
    assert_eq!(order, vec![keep, dead1, ret]);

    comp.run_all_passes();
    let order: Vec<_> = comp.graph().block_insts(bb0).collect();
    assert_eq!(order, vec![keep, ret]);
}
