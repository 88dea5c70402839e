//! SSA instructions.
//!
//! Instructions are arena-owned and addressed by [`InstId`]; input and user
//! edges are ids, which keeps the cyclic use/def graph free of reference
//! cycles and makes rewrites plain vector edits. Each instruction also
//! carries its intrusive list links (see [`crate::ir::list`]).

use super::types::{BinOp, CmpFlag, OpType};
use super::{BlockId, InstId};

/// Instruction payload. Bit and shift binops carry `ty = Int` by
/// construction; the builder enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstKind {
    Const { value: i64 },
    Param { index: usize, ty: OpType },
    Binop { op: BinOp, ty: OpType },
    Not,
    Branch,
    CondBranch { flag: CmpFlag },
    Phi { ty: OpType, incoming: Vec<BlockId> },
    Ret,
}

#[derive(Debug)]
pub struct Instruction {
    id: InstId,
    kind: InstKind,
    is_term: bool,
    /// Owning block; `None` while detached.
    block: Option<BlockId>,
    /// Ordered input slots. A slot cleared by instruction removal is `None`.
    inputs: Vec<Option<InstId>>,
    /// One entry per referencing input slot of a user.
    users: Vec<InstId>,
    prev: Option<InstId>,
    next: Option<InstId>,
}

impl Instruction {
    pub(crate) fn new(id: InstId, kind: InstKind, inputs: Vec<InstId>) -> Self {
        let is_term = matches!(
            kind,
            InstKind::Branch | InstKind::CondBranch { .. } | InstKind::Ret
        );
        Self {
            id,
            kind,
            is_term,
            block: None,
            inputs: inputs.into_iter().map(Some).collect(),
            users: Vec::new(),
            prev: None,
            next: None,
        }
    }

    pub fn id(&self) -> InstId {
        self.id
    }

    pub fn kind(&self) -> &InstKind {
        &self.kind
    }

    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    pub(crate) fn set_block(&mut self, block: Option<BlockId>) {
        self.block = block;
    }

    /// Result type of the instruction.
    pub fn ty(&self) -> OpType {
        match &self.kind {
            InstKind::Const { .. } => OpType::Int,
            InstKind::Param { ty, .. } => *ty,
            InstKind::Binop { ty, .. } => *ty,
            InstKind::Not => OpType::Int,
            InstKind::Phi { ty, .. } => *ty,
            InstKind::Branch | InstKind::CondBranch { .. } | InstKind::Ret => OpType::None,
        }
    }

    pub fn is_terminator(&self) -> bool {
        self.is_term
    }

    pub fn is_phi(&self) -> bool {
        matches!(self.kind, InstKind::Phi { .. })
    }

    pub fn const_value(&self) -> Option<i64> {
        match self.kind {
            InstKind::Const { value } => Some(value),
            _ => None,
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Input slots, including cleared ones.
    pub fn input_slots(&self) -> &[Option<InstId>] {
        &self.inputs
    }

    /// Live (non-cleared) inputs in slot order.
    pub fn inputs(&self) -> impl Iterator<Item = InstId> + '_ {
        self.inputs.iter().filter_map(|slot| *slot)
    }

    pub fn input(&self, idx: usize) -> Option<InstId> {
        self.inputs.get(idx).copied().flatten()
    }

    pub fn users(&self) -> &[InstId] {
        &self.users
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn prev(&self) -> Option<InstId> {
        self.prev
    }

    pub fn next(&self) -> Option<InstId> {
        self.next
    }

    pub(crate) fn set_prev(&mut self, prev: Option<InstId>) {
        self.prev = prev;
    }

    pub(crate) fn set_next(&mut self, next: Option<InstId>) {
        self.next = next;
    }

    pub(crate) fn add_user(&mut self, user: InstId) {
        self.users.push(user);
    }

    pub(crate) fn take_users(&mut self) -> Vec<InstId> {
        std::mem::take(&mut self.users)
    }

    pub(crate) fn extend_users(&mut self, users: Vec<InstId>) {
        self.users.extend(users);
    }

    /// Removes one occurrence of `user` from the user list.
    pub(crate) fn rm_user(&mut self, user: InstId) {
        if let Some(pos) = self.users.iter().position(|&u| u == user) {
            self.users.remove(pos);
        }
    }

    pub(crate) fn push_input(&mut self, input: InstId) {
        self.inputs.push(Some(input));
    }

    /// Rewrites every input slot holding `old` to `new`.
    pub(crate) fn switch_input(&mut self, old: InstId, new: InstId) {
        for slot in &mut self.inputs {
            if *slot == Some(old) {
                *slot = Some(new);
            }
        }
    }

    /// Clears every input slot holding `input`.
    pub(crate) fn clear_input(&mut self, input: InstId) {
        for slot in &mut self.inputs {
            if *slot == Some(input) {
                *slot = None;
            }
        }
    }

    /// Incoming blocks of a phi, parallel to its input slots.
    pub fn phi_incoming(&self) -> &[BlockId] {
        match &self.kind {
            InstKind::Phi { incoming, .. } => incoming,
            _ => &[],
        }
    }

    pub(crate) fn push_incoming(&mut self, block: BlockId) {
        match &mut self.kind {
            InstKind::Phi { incoming, .. } => incoming.push(block),
            _ => unreachable!("not a phi"),
        }
    }

    /// Value this phi selects when control arrives from `block`.
    pub fn phi_value_for(&self, block: BlockId) -> Option<InstId> {
        let incoming = self.phi_incoming();
        debug_assert_eq!(incoming.len(), self.inputs.len());
        let pos = incoming.iter().position(|&bb| bb == block)?;
        self.inputs[pos]
    }
}

#[cfg(test)]
#[path = "../tests/ir/t_inst.rs"]
mod tests;
