//! Structural IR checks.
//!
//! Analyses and passes assume a well-formed graph instead of validating
//! their input; this checker is the debugging aid that enforces the
//! assumptions after construction or after a rewrite.

use std::fmt;

use super::{BlockId, InstId, ProgramGraph};

#[derive(Debug, Clone)]
pub struct VerifyError {
    message: String,
}

impl VerifyError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for VerifyError {}

pub fn verify_graph(graph: &ProgramGraph) -> Result<(), VerifyError> {
    if let Some(entry) = graph.entry() {
        if !graph.block(entry).predecessors().is_empty() {
            return Err(VerifyError::new(format!(
                "entry {} has predecessors",
                entry
            )));
        }
    }

    for bb in graph.block_ids() {
        verify_block(graph, bb)?;
    }

    for bb in graph.block_ids() {
        for inst in graph.block_insts(bb) {
            verify_links(graph, inst)?;
        }
    }

    Ok(())
}

fn verify_block(graph: &ProgramGraph, bb: BlockId) -> Result<(), VerifyError> {
    let block = graph.block(bb);

    for inst in graph.block_insts(bb) {
        if graph.inst(inst).block() != Some(bb) {
            return Err(VerifyError::new(format!("{} not owned by {}", inst, bb)));
        }
        let is_tail = block.last_inst() == Some(inst);
        if graph.inst(inst).is_terminator() && !is_tail {
            return Err(VerifyError::new(format!(
                "terminator {} is not the tail of {}",
                inst, bb
            )));
        }
    }

    // Successor relation must be mirrored by the predecessor lists.
    for succ in block.successors() {
        let preds = graph.block(succ).predecessors();
        if !preds.contains(&bb) {
            return Err(VerifyError::new(format!(
                "{} missing from predecessors of {}",
                bb, succ
            )));
        }
    }

    // Each phi covers each predecessor exactly once.
    for inst in graph.block_insts(bb) {
        if !graph.inst(inst).is_phi() {
            continue;
        }
        let incoming = graph.inst(inst).phi_incoming();
        for pred in block.predecessors() {
            let count = incoming.iter().filter(|&&p| p == *pred).count();
            if count != 1 {
                return Err(VerifyError::new(format!(
                    "phi {} covers predecessor {} of {} {} times",
                    inst, pred, bb, count
                )));
            }
        }
    }

    Ok(())
}

fn verify_links(graph: &ProgramGraph, inst: InstId) -> Result<(), VerifyError> {
    for input in graph.inst(inst).inputs() {
        let occurrences = graph
            .inst(input)
            .users()
            .iter()
            .filter(|&&u| u == inst)
            .count();
        let slots = graph
            .inst(inst)
            .input_slots()
            .iter()
            .filter(|&&s| s == Some(input))
            .count();
        if occurrences != slots {
            return Err(VerifyError::new(format!(
                "{} uses {} in {} slots but appears {} times in its user list",
                inst, input, slots, occurrences
            )));
        }
    }
    for &user in graph.inst(inst).users() {
        if !graph.inst(user).inputs().any(|i| i == inst) {
            return Err(VerifyError::new(format!(
                "{} lists user {} which does not reference it",
                inst, user
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/ir/t_verify.rs"]
mod tests;
