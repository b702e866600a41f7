//! Presentation helpers: schedule tables and conflict-graph DOT output.
//!
//! These are read-only consumers of core outputs; nothing here feeds back
//! into classification.

use std::fmt::{Display, Write};

use schedcheck_core::graph::digraph::DiGraph;
use schedcheck_core::schedule::decompose::transaction_ids;
use schedcheck_core::schedule::types::{Action, TransactionId};

/// Render a schedule as a plain-text table with one column per
/// transaction, in ascending transaction-id order, one row per action.
#[must_use]
pub fn render_table<Object>(schedule: &[Action<Object>]) -> String
where
    Object: Display,
{
    let mut ids = transaction_ids(schedule);
    ids.sort_unstable();

    let rendered: Vec<String> = schedule.iter().map(|action| format!("{action}")).collect();
    let width = rendered
        .iter()
        .map(String::len)
        .chain(ids.iter().map(|id| format!("T{id}").len()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    let mut push_row = |cells: Vec<String>, separator: &str| {
        let row = cells.join(separator);
        output.push_str(row.trim_end());
        output.push('\n');
    };

    let header = ids
        .iter()
        .map(|id| format!("{:<width$}", format!("T{id}")))
        .collect();
    push_row(header, " | ");

    let rule = ids.iter().map(|_| "-".repeat(width)).collect();
    push_row(rule, "-+-");

    for (action, text) in schedule.iter().zip(rendered) {
        let row = ids
            .iter()
            .map(|&id| {
                if id == action.transaction() {
                    format!("{text:<width$}")
                } else {
                    " ".repeat(width)
                }
            })
            .collect();
        push_row(row, " | ");
    }

    output
}

/// Render a conflict graph in Graphviz DOT, with vertices and edges in
/// ascending transaction-id order so the output is deterministic.
#[must_use]
pub fn render_dot(graph: &DiGraph<TransactionId>) -> String {
    let mut vertices: Vec<TransactionId> = graph.adj_map.keys().copied().collect();
    vertices.sort_unstable();

    let mut edges = graph.to_edge_list();
    edges.sort_unstable();

    let mut output = String::new();
    output.push_str("digraph conflicts {\n");
    for vertex in vertices {
        let _ = writeln!(output, "  \"T{vertex}\";");
    }
    for (source, target) in edges {
        let _ = writeln!(output, "  \"T{source}\" -> \"T{target}\";");
    }
    output.push_str("}\n");
    output
}
