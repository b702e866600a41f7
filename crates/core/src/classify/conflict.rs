//! Conflict graph construction and conflict-serializability.

use core::fmt::Debug;
use core::hash::Hash;

use crate::graph::digraph::DiGraph;
use crate::schedule::decompose::{drop_aborts, transaction_ids};
use crate::schedule::types::{Action, TransactionId};

/// Builds the conflict graph of a schedule.
///
/// Aborted transactions are removed first. Nodes are the surviving
/// transaction ids. An edge (a, b) exists whenever some action of
/// transaction `a` precedes, in schedule order, some action of transaction
/// `b`, both on the same object, from different transactions, with at
/// least one of the two being a write.
///
/// All qualifying pairs are checked, O(n^2) in schedule length. Schedules
/// here are teaching-scale, not production logs.
#[must_use]
pub fn conflict_graph<Object>(schedule: &[Action<Object>]) -> DiGraph<TransactionId>
where
    Object: Eq + Hash + Clone,
{
    let schedule = drop_aborts(schedule);

    let mut graph = DiGraph::default();
    for id in transaction_ids(&schedule) {
        graph.add_vertex(id);
    }

    for (i, first) in schedule.iter().enumerate() {
        for second in &schedule[i + 1..] {
            let same_object = match (first.object(), second.object()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
            let different_transaction = first.transaction() != second.transaction();
            let conflicting = first.is_write() || second.is_write();
            if same_object && different_transaction && conflicting {
                graph.add_edge(first.transaction(), second.transaction());
            }
        }
    }

    graph
}

/// A schedule is conflict-serializable iff its conflict graph is acyclic.
///
/// A cycle means no serial order of the transactions preserves every
/// pairwise conflict, so no conflict-equivalent serial schedule exists.
pub fn conflict_serializable<Object>(schedule: &[Action<Object>]) -> bool
where
    Object: Eq + Hash + Clone + Debug,
{
    let graph = conflict_graph(schedule);
    let acyclic = graph.is_acyclic();
    if !acyclic {
        tracing::debug!(cycle_edge = ?graph.find_cycle_edge(), "conflict graph is cyclic");
    }
    acyclic
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::schedule::types::TransactionId;

    fn r(t: u64, object: &'static str) -> Action<&'static str> {
        Action::read(TransactionId(t), object)
    }

    fn w(t: u64, object: &'static str) -> Action<&'static str> {
        Action::write(TransactionId(t), object)
    }

    fn c(t: u64) -> Action<&'static str> {
        Action::commit(TransactionId(t))
    }

    #[test]
    fn test_disjoint_objects_no_edges() {
        let schedule = vec![r(1, "A"), w(1, "A"), r(2, "B"), w(2, "B")];
        let graph = conflict_graph(&schedule);

        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.to_edge_list().is_empty());
        assert!(conflict_serializable(&schedule));
    }

    #[test]
    fn test_read_read_is_not_a_conflict() {
        let schedule = vec![r(1, "A"), r(2, "A"), c(1), c(2)];
        let graph = conflict_graph(&schedule);

        assert!(graph.to_edge_list().is_empty());
    }

    #[test]
    fn test_commits_never_conflict() {
        // Neither commit carries an object, so the pairwise scan must not
        // treat two object-less actions as touching the same object.
        let schedule = vec![w(1, "A"), c(1), c(2), r(2, "B")];
        let graph = conflict_graph(&schedule);

        assert!(graph.to_edge_list().is_empty());
    }

    #[test]
    fn test_conflict_cycle() {
        // R1(X) W2(X) gives 1 -> 2; W2(X) W1(X) gives 2 -> 1.
        let schedule = vec![r(1, "X"), w(2, "X"), w(1, "X"), c(2), c(1)];
        let graph = conflict_graph(&schedule);

        assert!(graph.has_edge(&TransactionId(1), &TransactionId(2)));
        assert!(graph.has_edge(&TransactionId(2), &TransactionId(1)));
        assert!(!conflict_serializable(&schedule));
    }

    #[test]
    fn test_aborted_transactions_are_ignored() {
        let schedule = vec![
            r(1, "X"),
            w(2, "X"),
            w(1, "X"),
            Action::abort(TransactionId(2)),
            c(1),
        ];
        let graph = conflict_graph(&schedule);

        assert_eq!(graph.vertex_count(), 1);
        assert!(graph.to_edge_list().is_empty());
        assert!(conflict_serializable(&schedule));
    }
}
