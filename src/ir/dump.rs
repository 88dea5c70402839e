//! DOT rendering of program graphs and loop annotations.
//!
//! The only I/O-adjacent surface of the crate; output is informational and
//! deterministic given graph state, nothing more is guaranteed.

use std::fmt::Write;

use crate::analysis::loops::{LoopId, LoopTree};
use crate::graph::dot;

use super::inst::InstKind;
use super::{BlockId, InstId, ProgramGraph};

/// Renders the whole graph: one record-shaped node per block, one edge per
/// successor, emitted in DFS order from the entry.
pub fn program_graph(graph: &ProgramGraph) -> String {
    let mut out = String::from("digraph G {\n");
    for bb in graph.block_ids() {
        write!(out, "\"{}\" [shape=record,label=\"", bb).unwrap();
        write_block(&mut out, graph, bb);
        out.push_str("\"];\n");
    }
    if let Some(entry) = graph.entry() {
        out.push_str(&dot::edges(graph, entry, |bb| bb.to_string()));
    }
    out.push('}');
    out
}

fn write_block(out: &mut String, graph: &ProgramGraph, bb: BlockId) {
    write!(out, "{}:\\l ", bb).unwrap();
    for inst in graph.block_insts(bb) {
        write!(out, "{}\\l ", inst_text(graph, inst)).unwrap();
    }
}

/// One-line rendering of an instruction.
pub fn inst_text(graph: &ProgramGraph, id: InstId) -> String {
    let inst = graph.inst(id);
    let mut out = format!("{}: ", id);
    match inst.kind() {
        InstKind::Const { value } => {
            write!(out, "Const {} {}", inst.ty(), value).unwrap();
        }
        InstKind::Param { index, ty } => {
            write!(out, "Param {}{}", ty, index).unwrap();
        }
        InstKind::Binop { op, ty } => {
            write!(out, "{} {}", op.mnemonic(), ty).unwrap();
            write_operands(&mut out, graph, id);
        }
        InstKind::Not => {
            write!(out, "Not {}", inst.ty()).unwrap();
            write_operands(&mut out, graph, id);
        }
        InstKind::Branch => {
            let target = inst
                .block()
                .and_then(|bb| graph.block(bb).uncond_successor());
            match target {
                Some(target) => write!(out, "Br {}", target).unwrap(),
                None => out.push_str("Br ?"),
            }
        }
        InstKind::CondBranch { flag } => {
            write!(out, "CondBr {}", flag).unwrap();
            write_operands(&mut out, graph, id);
            let block = inst.block().map(|bb| graph.block(bb));
            let false_bb = block.and_then(|bb| bb.false_successor());
            let true_bb = block.and_then(|bb| bb.true_successor());
            if let (Some(f), Some(t)) = (false_bb, true_bb) {
                write!(out, " F: {} T: {}", f, t).unwrap();
            }
        }
        InstKind::Phi { ty, incoming } => {
            write!(out, "Phi {}", ty).unwrap();
            for (idx, bb) in incoming.iter().enumerate() {
                match inst.input(idx) {
                    Some(value) => write!(out, " [{}: {} {}];", idx, bb, value).unwrap(),
                    None => write!(out, " [{}: {} -];", idx, bb).unwrap(),
                }
            }
        }
        InstKind::Ret => {
            out.push_str("Ret");
            write_operands(&mut out, graph, id);
        }
    }
    out
}

fn write_operands(out: &mut String, graph: &ProgramGraph, id: InstId) {
    for slot in graph.inst(id).input_slots() {
        match slot {
            Some(input) => write!(out, " {}", input).unwrap(),
            None => out.push_str(" -"),
        }
    }
}

/// Renders the loop tree: one record per loop (header, members, latches),
/// edges are nesting links.
pub fn loop_forest(loops: &LoopTree) -> String {
    let mut out = String::from("digraph {\n");
    for (id, info) in loops.tree().iter() {
        write!(out, "\"{}\" [shape=record,label=\"head {}\\l Blocks", id, id).unwrap();
        for bb in info.blocks() {
            write!(out, " {}", bb.0).unwrap();
        }
        out.push_str("\\l Latches");
        for bb in info.latches() {
            write!(out, " {}", bb.0).unwrap();
        }
        out.push_str("\"];\n");
    }
    if let Some(root) = loops.tree().root() {
        out.push_str(&dot::edges(loops.tree(), root, |id: LoopId| id.to_string()));
    }
    out.push('}');
    out
}

#[cfg(test)]
#[path = "../tests/ir/t_dump.rs"]
mod tests;
