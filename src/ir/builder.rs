//! IR construction and rewriting.
//!
//! The builder is the only supported mutator of a [`ProgramGraph`]: it
//! creates typed instructions at the insertion point, maintains use/def
//! bookkeeping, and provides the replacement primitives the optimization
//! passes are written against. Fallible operations leave the graph
//! unchanged when they fail.

use super::inst::InstKind;
use super::types::{BinOp, CmpFlag, OpType};
use super::{BlockId, InstId, IrError, ProgramGraph};

pub struct IrBuilder<'g> {
    graph: &'g mut ProgramGraph,
    insert_bb: Option<BlockId>,
}

impl<'g> IrBuilder<'g> {
    pub fn new(graph: &'g mut ProgramGraph) -> Self {
        Self {
            graph,
            insert_bb: None,
        }
    }

    pub fn graph(&self) -> &ProgramGraph {
        self.graph
    }

    pub fn set_entry_point(&mut self, bb: BlockId) {
        self.graph.set_entry(bb);
    }

    pub fn set_insert_point(&mut self, bb: BlockId) {
        self.insert_bb = Some(bb);
    }

    pub fn insert_point(&self) -> Option<BlockId> {
        self.insert_bb
    }

    fn insert_bb(&self) -> BlockId {
        self.insert_bb.expect("no insertion point set")
    }

    fn append(&mut self, inst: InstId) {
        let bb = self.insert_bb();
        self.graph.append_inst(bb, inst);
    }

    fn check_int_operands(&self, operands: &[InstId]) -> Result<(), IrError> {
        let got: Vec<OpType> = operands
            .iter()
            .map(|&op| self.graph.inst(op).ty())
            .collect();
        if got.iter().any(|&ty| ty != OpType::Int) {
            return Err(IrError::OperandTypeMismatch {
                got,
                expected: vec![OpType::Int; operands.len()],
            });
        }
        Ok(())
    }

    fn register_users(&mut self, user: InstId, sources: &[InstId]) {
        for &src in sources {
            self.graph.inst_mut(src).add_user(user);
        }
    }

    /// Loads parameter `idx`. Fails if the index is out of range.
    pub fn create_param_load(&mut self, idx: usize) -> Result<InstId, IrError> {
        if idx >= self.graph.num_params() {
            return Err(IrError::InvalidArgument(format!(
                "parameter index {} out of range",
                idx
            )));
        }
        let param = self.graph.param(idx);
        let inst = self.graph.create_inst(
            InstKind::Param {
                index: param.index,
                ty: param.ty,
            },
            Vec::new(),
        );
        self.append(inst);
        Ok(inst)
    }

    pub fn create_int_constant(&mut self, value: i64) -> InstId {
        let inst = self.make_int_constant(value);
        self.append(inst);
        inst
    }

    /// Creates a detached integer constant. Used by rewriting passes, which
    /// place it themselves.
    pub fn make_int_constant(&mut self, value: i64) -> InstId {
        self.graph.create_inst(InstKind::Const { value }, Vec::new())
    }

    fn create_binop(&mut self, op: BinOp, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.check_int_operands(&[lhs, rhs])?;
        let inst = self
            .graph
            .create_inst(InstKind::Binop { op, ty: OpType::Int }, vec![lhs, rhs]);
        self.append(inst);
        self.register_users(inst, &[lhs, rhs]);
        Ok(inst)
    }

    pub fn create_iadd(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Add, lhs, rhs)
    }

    pub fn create_isub(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Sub, lhs, rhs)
    }

    pub fn create_imul(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Mul, lhs, rhs)
    }

    pub fn create_idiv(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Div, lhs, rhs)
    }

    pub fn create_imod(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Mod, lhs, rhs)
    }

    pub fn create_and(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::And, lhs, rhs)
    }

    pub fn create_or(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Or, lhs, rhs)
    }

    pub fn create_xor(&mut self, lhs: InstId, rhs: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Xor, lhs, rhs)
    }

    pub fn create_shl(&mut self, value: InstId, shift: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Shl, value, shift)
    }

    pub fn create_shr(&mut self, value: InstId, shift: InstId) -> Result<InstId, IrError> {
        self.create_binop(BinOp::Shr, value, shift)
    }

    /// Creates a detached shift-right with registered inputs. Used by
    /// rewriting passes, which place it themselves.
    pub fn make_shr(&mut self, value: InstId, shift: InstId) -> InstId {
        debug_assert_eq!(self.graph.inst(value).ty(), OpType::Int);
        debug_assert_eq!(self.graph.inst(shift).ty(), OpType::Int);
        let inst = self.graph.create_inst(
            InstKind::Binop {
                op: BinOp::Shr,
                ty: OpType::Int,
            },
            vec![value, shift],
        );
        self.register_users(inst, &[value, shift]);
        inst
    }

    pub fn create_not(&mut self, value: InstId) -> Result<InstId, IrError> {
        self.check_int_operands(&[value])?;
        let inst = self.graph.create_inst(InstKind::Not, vec![value]);
        self.append(inst);
        self.register_users(inst, &[value]);
        Ok(inst)
    }

    /// Appends an unconditional branch. The successor edge is wired only if
    /// the block has none yet; a branch appended after a terminator is
    /// unreachable but structurally present.
    pub fn create_branch(&mut self, target: BlockId) -> InstId {
        let inst = self.graph.create_inst(InstKind::Branch, Vec::new());
        self.append(inst);
        let bb = self.insert_bb();
        if !self.graph.block(bb).has_successor() {
            self.graph.set_uncond_successor(bb, target);
        }
        inst
    }

    /// Appends a conditional branch comparing two integer operands.
    /// Successor slots are wired (false first) only if the block has none.
    pub fn create_conditional_branch(
        &mut self,
        flag: CmpFlag,
        false_bb: BlockId,
        true_bb: BlockId,
        lhs: InstId,
        rhs: InstId,
    ) -> Result<InstId, IrError> {
        self.check_int_operands(&[lhs, rhs])?;
        let inst = self
            .graph
            .create_inst(InstKind::CondBranch { flag }, vec![lhs, rhs]);
        self.append(inst);
        self.register_users(inst, &[lhs, rhs]);
        let bb = self.insert_bb();
        if !self.graph.block(bb).has_successor() {
            self.graph.set_cond_successors(bb, false_bb, true_bb);
        }
        Ok(inst)
    }

    /// Appends an empty phi; options are added with [`Self::add_phi_option`].
    pub fn create_phi(&mut self, ty: OpType) -> InstId {
        let inst = self.graph.create_inst(
            InstKind::Phi {
                ty,
                incoming: Vec::new(),
            },
            Vec::new(),
        );
        self.append(inst);
        inst
    }

    /// Appends an `(incoming_bb, value)` pair to `phi`. The value's type
    /// must match the phi's declared type.
    pub fn add_phi_option(
        &mut self,
        phi: InstId,
        incoming_bb: BlockId,
        value: InstId,
    ) -> Result<(), IrError> {
        let phi_ty = self.graph.inst(phi).ty();
        let value_ty = self.graph.inst(value).ty();
        if value_ty != phi_ty {
            return Err(IrError::OperandTypeMismatch {
                got: vec![value_ty],
                expected: vec![phi_ty],
            });
        }
        self.graph.inst_mut(value).add_user(phi);
        self.graph.inst_mut(phi).push_input(value);
        self.graph.inst_mut(phi).push_incoming(incoming_bb);
        Ok(())
    }

    pub fn create_ret(&mut self, value: InstId) -> InstId {
        let inst = self.graph.create_inst(InstKind::Ret, vec![value]);
        self.append(inst);
        self.register_users(inst, &[value]);
        inst
    }

    /// Moves every user of `from` onto `to`, rewriting the users' input
    /// slots. `from` is left with no users.
    pub fn move_users(&mut self, from: InstId, to: InstId) {
        let users = self.graph.inst_mut(from).take_users();
        for &user in &users {
            self.graph.inst_mut(user).switch_input(from, to);
        }
        self.graph.inst_mut(to).extend_users(users);
    }

    /// Unregisters `inst` from the use/def web and detaches it from its
    /// block. Users keep a cleared input slot; the arena keeps the storage.
    /// Returns the list successor of the removed instruction.
    pub fn rm_instruction(&mut self, inst: InstId) -> Option<InstId> {
        let inputs: Vec<InstId> = self.graph.inst(inst).inputs().collect();
        for input in inputs {
            self.graph.inst_mut(input).rm_user(inst);
        }
        let users = self.graph.inst_mut(inst).take_users();
        for user in users {
            self.graph.inst_mut(user).clear_input(inst);
        }
        self.detach(inst)
    }

    /// Inserts `new` right after `old`, redirects all users of `old` to
    /// `new`, unregisters `old` from its inputs, and detaches `old`.
    /// Returns `new`.
    pub fn replace(&mut self, old: InstId, new: InstId) -> InstId {
        self.graph.insert_inst_after(old, new);
        self.move_users(old, new);
        let inputs: Vec<InstId> = self.graph.inst(old).inputs().collect();
        for input in inputs {
            self.graph.inst_mut(input).rm_user(old);
        }
        self.detach(old);
        new
    }

    /// Places the detached `inst` before `point` in `point`'s block.
    pub fn insert_before(&mut self, inst: InstId, point: InstId) {
        self.graph.insert_inst_before(point, inst);
    }

    /// Places the detached `inst` after `point` in `point`'s block.
    pub fn insert_after(&mut self, inst: InstId, point: InstId) {
        self.graph.insert_inst_after(point, inst);
    }

    fn detach(&mut self, inst: InstId) -> Option<InstId> {
        self.graph.detach_inst(inst)
    }
}

#[cfg(test)]
#[path = "../tests/ir/t_builder.rs"]
mod tests;
