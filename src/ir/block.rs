//! Basic blocks.

use super::list::InstList;
use super::{BlockId, InstId};

/// Successor slot semantics are contractual: slot 0 is the false or
/// unconditional target, slot 1 the true target.
pub const FALSE_IDX: usize = 0;
pub const UNCOND_IDX: usize = 0;
pub const TRUE_IDX: usize = 1;

#[derive(Debug)]
pub struct BasicBlock {
    id: BlockId,
    preds: Vec<BlockId>,
    succs: [Option<BlockId>; 2],
    pub(crate) insts: InstList,
}

impl BasicBlock {
    pub(crate) fn new(id: BlockId) -> Self {
        Self {
            id,
            preds: Vec::new(),
            succs: [None, None],
            insts: InstList::new(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn predecessors(&self) -> &[BlockId] {
        &self.preds
    }

    pub(crate) fn add_predecessor(&mut self, pred: BlockId) {
        self.preds.push(pred);
    }

    /// Set successors in slot order.
    pub fn successors(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.succs.iter().filter_map(|slot| *slot)
    }

    pub fn has_successor(&self) -> bool {
        self.succs.iter().any(|slot| slot.is_some())
    }

    pub fn uncond_successor(&self) -> Option<BlockId> {
        self.succs[UNCOND_IDX]
    }

    pub fn false_successor(&self) -> Option<BlockId> {
        self.succs[FALSE_IDX]
    }

    pub fn true_successor(&self) -> Option<BlockId> {
        self.succs[TRUE_IDX]
    }

    pub(crate) fn set_successor(&mut self, idx: usize, succ: BlockId) {
        self.succs[idx] = Some(succ);
    }

    pub fn first_inst(&self) -> Option<InstId> {
        self.insts.head()
    }

    pub fn last_inst(&self) -> Option<InstId> {
        self.insts.tail()
    }

    pub fn is_inst_list_empty(&self) -> bool {
        self.insts.is_empty()
    }
}
