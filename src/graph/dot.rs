//! DOT edge rendering for any [`DirectedGraph`].

use std::fmt::Write;

use super::{visit_dfs, DirectedGraph, Direction};

/// Renders the edge list of the subgraph reachable from `entry`, one
/// `"a" -> "b"` line per edge, in DFS order. The caller wraps the result in
/// a `digraph { ... }` block and supplies node declarations if needed.
pub fn edges<G, F>(graph: &G, entry: G::Node, mut label: F) -> String
where
    G: DirectedGraph,
    F: FnMut(G::Node) -> String,
{
    let mut out = String::new();
    visit_dfs(graph, entry, Direction::Forward, |node| {
        for succ in graph.successors(node) {
            writeln!(out, "\"{}\" -> \"{}\"", label(node), label(succ)).unwrap();
        }
    });
    out
}
