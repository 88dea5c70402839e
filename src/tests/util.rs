// Shared graph-building helpers for the unit tests.
#[allow(dead_code)]
mod util {
    use crate::ir::{BlockId, CmpFlag, IrBuilder, ProgramGraph};

    /// Creates `n` empty blocks.
    pub fn blocks(graph: &mut ProgramGraph, n: usize) -> Vec<BlockId> {
        (0..n).map(|_| graph.create_block()).collect()
    }

    /// Wires `from -> to` with an unconditional branch.
    pub fn connect(builder: &mut IrBuilder<'_>, from: BlockId, to: BlockId) {
        builder.set_insert_point(from);
        builder.create_branch(to);
    }

    /// Wires `from -> {false_bb, true_bb}` with a conditional branch over a
    /// dummy constant.
    pub fn connect_cond(
        builder: &mut IrBuilder<'_>,
        from: BlockId,
        false_bb: BlockId,
        true_bb: BlockId,
    ) {
        builder.set_insert_point(from);
        let dummy = builder.create_int_constant(10);
        builder
            .create_conditional_branch(CmpFlag::Eq, false_bb, true_bb, dummy, dummy)
            .unwrap();
    }
}
use self::util::*;
