//! The program graph: block and instruction arenas plus parameters.

use crate::graph::DirectedGraph;

use super::block::{BasicBlock, FALSE_IDX, TRUE_IDX, UNCOND_IDX};
use super::inst::{InstKind, Instruction};
use super::types::OpType;
use super::{BlockId, InstId};

/// Function parameter descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub index: usize,
    pub ty: OpType,
}

/// One `ProgramGraph` per compiled method. Arenas grow append-only;
/// removals happen only at the instruction-list level, so ids stay stable
/// for side tables.
#[derive(Default)]
pub struct ProgramGraph {
    blocks: Vec<BasicBlock>,
    insts: Vec<Instruction>,
    params: Vec<Param>,
    entry: Option<BlockId>,
}

impl ProgramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::new(id));
        id
    }

    pub(crate) fn create_inst(&mut self, kind: InstKind, inputs: Vec<InstId>) -> InstId {
        let id = InstId(self.insts.len() as u32);
        self.insts.push(Instruction::new(id, kind, inputs));
        id
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn num_insts(&self) -> usize {
        self.insts.len()
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.index()]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut BasicBlock {
        &mut self.blocks[id.index()]
    }

    pub fn inst(&self, id: InstId) -> &Instruction {
        &self.insts[id.index()]
    }

    pub(crate) fn inst_mut(&mut self, id: InstId) -> &mut Instruction {
        &mut self.insts[id.index()]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.iter()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.iter().map(|bb| bb.id())
    }

    pub fn set_entry(&mut self, bb: BlockId) {
        self.entry = Some(bb);
    }

    pub fn entry(&self) -> Option<BlockId> {
        self.entry
    }

    /// Creates a parameter of `ty`, returning its index.
    pub fn create_param(&mut self, ty: OpType) -> usize {
        let index = self.params.len();
        self.params.push(Param { index, ty });
        index
    }

    pub fn param(&self, idx: usize) -> Param {
        self.params[idx]
    }

    pub fn num_params(&self) -> usize {
        self.params.len()
    }

    /// Wires `from`'s unconditional slot to `to` and registers the inverse
    /// predecessor edge.
    pub fn set_uncond_successor(&mut self, from: BlockId, to: BlockId) {
        self.blocks[from.index()].set_successor(UNCOND_IDX, to);
        self.blocks[to.index()].add_predecessor(from);
    }

    /// Wires both conditional slots and the inverse predecessor edges.
    pub fn set_cond_successors(&mut self, from: BlockId, false_bb: BlockId, true_bb: BlockId) {
        self.blocks[from.index()].set_successor(FALSE_IDX, false_bb);
        self.blocks[from.index()].set_successor(TRUE_IDX, true_bb);
        self.blocks[false_bb.index()].add_predecessor(from);
        self.blocks[true_bb.index()].add_predecessor(from);
    }

    /// Instruction ids of `bb` in list order.
    pub fn block_insts(&self, bb: BlockId) -> impl Iterator<Item = InstId> + '_ {
        self.blocks[bb.index()].insts.iter(&self.insts)
    }

    /// Instruction ids of `bb` in reverse list order.
    pub fn block_insts_rev(&self, bb: BlockId) -> impl Iterator<Item = InstId> + '_ {
        self.blocks[bb.index()].insts.iter_rev(&self.insts)
    }

    pub fn block_len(&self, bb: BlockId) -> usize {
        self.blocks[bb.index()].insts.len(&self.insts)
    }

    /// Appends `inst` to `bb`'s list and records ownership.
    pub(crate) fn append_inst(&mut self, bb: BlockId, inst: InstId) {
        let (blocks, insts) = (&mut self.blocks, &mut self.insts);
        blocks[bb.index()].insts.insert_tail(insts, inst);
        insts[inst.index()].set_block(Some(bb));
    }

    /// Places the detached `node` before `point` in `point`'s block.
    pub(crate) fn insert_inst_before(&mut self, point: InstId, node: InstId) {
        let (blocks, insts) = (&mut self.blocks, &mut self.insts);
        let bb = insts[point.index()]
            .block()
            .expect("insertion point is detached");
        blocks[bb.index()].insts.insert_before(insts, point, node);
        insts[node.index()].set_block(Some(bb));
    }

    /// Places the detached `node` after `point` in `point`'s block.
    pub(crate) fn insert_inst_after(&mut self, point: InstId, node: InstId) {
        let (blocks, insts) = (&mut self.blocks, &mut self.insts);
        let bb = insts[point.index()]
            .block()
            .expect("insertion point is detached");
        blocks[bb.index()].insts.insert_after(insts, point, node);
        insts[node.index()].set_block(Some(bb));
    }

    /// Unlinks `inst` from its block's list. Returns the list successor.
    pub(crate) fn detach_inst(&mut self, inst: InstId) -> Option<InstId> {
        let (blocks, insts) = (&mut self.blocks, &mut self.insts);
        let bb = insts[inst.index()].block()?;
        let next = blocks[bb.index()].insts.remove(insts, inst);
        insts[inst.index()].set_block(None);
        next
    }
}

impl DirectedGraph for ProgramGraph {
    type Node = BlockId;

    fn successors(&self, node: BlockId) -> Vec<BlockId> {
        self.block(node).successors().collect()
    }

    fn predecessors(&self, node: BlockId) -> Vec<BlockId> {
        self.block(node).predecessors().to_vec()
    }
}
