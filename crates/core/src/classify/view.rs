//! View equivalence and view-serializability.
//!
//! Two schedules over the same transactions are view-equivalent when they
//! agree on which transactions read initial values, which write each read
//! observes, and which transaction writes each object last. A schedule is
//! view-serializable when it is view-equivalent to some serial ordering of
//! its transactions.
//!
//! Deciding view-serializability is NP-complete in general. The checker
//! takes two exact shortcuts before falling back to brute force: a
//! conflict-serializable schedule is always view-serializable, and a
//! non-conflict-serializable schedule without blind writes never is. Only
//! schedules with blind writes reach the factorial permutation search,
//! which is acceptable at teaching scale.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::classify::conflict::conflict_serializable;
use crate::graph::digraph::DiGraph;
use crate::schedule::decompose::{drop_aborts, number, transaction_ids, transactions};
use crate::schedule::types::{Action, Schedule, TransactionId};

/// Maps each object to the transaction ids that read it before any write.
///
/// Ids are listed in schedule order; a transaction appears once per
/// qualifying read. Objects never read before their first write are
/// absent.
#[must_use]
pub fn first_reads<Object>(schedule: &[Action<Object>]) -> HashMap<Object, Vec<TransactionId>>
where
    Object: Eq + Hash + Clone,
{
    let mut reads: HashMap<Object, Vec<TransactionId>> = HashMap::new();
    let mut written: HashSet<Object> = HashSet::new();
    for action in schedule {
        match action {
            Action::Read {
                transaction,
                object,
            } => {
                if !written.contains(object) {
                    reads.entry(object.clone()).or_default().push(*transaction);
                }
            }
            Action::Write { object, .. } => {
                written.insert(object.clone());
            }
            Action::Commit { .. } | Action::Abort { .. } => {}
        }
    }
    reads
}

/// Maps each object to the transaction that writes it last.
///
/// Objects never written are absent.
#[must_use]
pub fn last_writers<Object>(schedule: &[Action<Object>]) -> HashMap<Object, TransactionId>
where
    Object: Eq + Hash + Clone,
{
    let mut writers = HashMap::new();
    for action in schedule {
        match action {
            Action::Write {
                transaction,
                object,
            } => {
                writers.insert(object.clone(), *transaction);
            }
            Action::Read { .. } | Action::Commit { .. } | Action::Abort { .. } => {}
        }
    }
    writers
}

/// Builds the view graph of a schedule.
///
/// Actions are numbered per transaction first, then every read gets an
/// edge to the most recent preceding numbered write of the same object.
/// A read with no preceding write gets no edge. The numbering keeps nodes
/// distinct when a transaction repeats an action.
#[must_use]
pub fn view_graph<Object>(schedule: &[Action<Object>]) -> DiGraph<(usize, Action<Object>)>
where
    Object: Eq + Hash + Clone + Debug,
{
    let mut graph = DiGraph::default();
    let mut last_written: HashMap<Object, (usize, Action<Object>)> = HashMap::new();
    for (position, action) in number(schedule) {
        match &action {
            Action::Write { object, .. } => {
                last_written.insert(object.clone(), (position, action.clone()));
            }
            Action::Read { object, .. } => {
                if let Some(write) = last_written.get(object) {
                    graph.add_edge((position, action.clone()), write.clone());
                }
            }
            Action::Commit { .. } | Action::Abort { .. } => {}
        }
    }
    graph
}

/// Decides whether two schedules are view-equivalent.
///
/// After dropping aborted transactions from both, the schedules must agree
/// on first reads, on the view graph, and on the final writer of every
/// object. The three conditions are independently necessary, so the first
/// mismatch short-circuits.
///
/// # Panics
///
/// Both schedules must range over the identical set of transaction ids.
/// A violation is a contract breach by the caller and panics rather than
/// being absorbed into an incorrect boolean.
#[must_use]
pub fn view_equivalent<Object>(s1: &[Action<Object>], s2: &[Action<Object>]) -> bool
where
    Object: Eq + Hash + Clone + Debug,
{
    let ids1: HashSet<TransactionId> = transaction_ids(s1).into_iter().collect();
    let ids2: HashSet<TransactionId> = transaction_ids(s2).into_iter().collect();
    assert!(
        ids1 == ids2,
        "view equivalence requires schedules over the same transactions: {ids1:?} vs {ids2:?}",
    );

    let s1 = drop_aborts(s1);
    let s2 = drop_aborts(s2);

    first_reads(&s1) == first_reads(&s2)
        && view_graph(&s1) == view_graph(&s2)
        && last_writers(&s1) == last_writers(&s2)
}

/// Invokes `found` on every permutation of `items` (Heap's algorithm),
/// stopping early as soon as `found` returns `true`.
fn any_permutation<T, F>(k: usize, items: &mut [T], found: &mut F) -> bool
where
    F: FnMut(&[T]) -> bool,
{
    if k <= 1 {
        return found(items);
    }
    for i in 0..k {
        if any_permutation(k - 1, items, found) {
            return true;
        }
        if i < k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
        }
    }
    false
}

/// Decides whether a schedule is view-serializable.
///
/// Aborted transactions are ignored. The check proceeds in three stages:
///
/// 1. Conflict-serializability implies view-serializability, which settles
///    the common case without any search.
/// 2. A schedule that is not conflict-serializable can only be
///    view-serializable through a blind write (a write to an object the
///    transaction has not itself read earlier). No blind write anywhere
///    means not view-serializable.
/// 3. Otherwise every permutation of the per-transaction partitions is
///    concatenated into a serial candidate and tested for view
///    equivalence against the original. Factorial in transaction count.
#[must_use]
pub fn view_serializable<Object>(schedule: &[Action<Object>]) -> bool
where
    Object: Eq + Hash + Clone + Debug,
{
    let schedule = drop_aborts(schedule);

    if conflict_serializable(&schedule) {
        return true;
    }

    let partitions = transactions(&schedule);

    let mut blind_write = false;
    for partition in &partitions {
        let mut objects_read: HashSet<Object> = HashSet::new();
        for action in partition {
            match action {
                Action::Write { object, .. } => {
                    if !objects_read.contains(object) {
                        blind_write = true;
                    }
                }
                Action::Read { object, .. } => {
                    objects_read.insert(object.clone());
                }
                Action::Commit { .. } | Action::Abort { .. } => {}
            }
        }
    }
    if !blind_write {
        return false;
    }

    tracing::debug!(
        transactions = partitions.len(),
        "no shortcut applies, enumerating serial permutations"
    );

    let mut partitions = partitions;
    let count = partitions.len();
    let mut is_equivalent = |ordering: &[Schedule<Object>]| {
        let candidate: Schedule<Object> = ordering.iter().flatten().cloned().collect();
        view_equivalent(&candidate, &schedule)
    };
    any_permutation(count, &mut partitions, &mut is_equivalent)
}
