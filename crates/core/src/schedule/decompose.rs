//! Derived views of a schedule.
//!
//! Every classifier works on one or more of these normalizations: the
//! per-transaction partitioning, the abort-filtered copy, the copy with
//! synthetic commits appended, and the per-transaction action numbering.
//! All of them return fresh values; the input schedule is never touched.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::schedule::types::{Action, Schedule, TransactionId};

/// Unique transaction ids in the order they first appear in the schedule.
#[must_use]
pub fn transaction_ids<Object>(schedule: &[Action<Object>]) -> Vec<TransactionId> {
    let mut ids = Vec::new();
    for action in schedule {
        if !ids.contains(&action.transaction()) {
            ids.push(action.transaction());
        }
    }
    ids
}

/// Partitions a schedule into one action subsequence per transaction.
///
/// Global order is preserved within each partition. Partitions are ordered
/// by the first appearance of their transaction id.
#[must_use]
pub fn transactions<Object>(schedule: &[Action<Object>]) -> Vec<Schedule<Object>>
where
    Object: Clone,
{
    let ids = transaction_ids(schedule);
    let index: HashMap<TransactionId, usize> =
        ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let mut partitions: Vec<Schedule<Object>> = ids.iter().map(|_| Vec::new()).collect();
    for action in schedule {
        partitions[index[&action.transaction()]].push(action.clone());
    }
    partitions
}

/// Removes every action of every transaction that aborts.
///
/// A transaction counts as aborted if an `Abort` for it appears anywhere
/// in the schedule, so actions before the abort are removed too.
#[must_use]
pub fn drop_aborts<Object>(schedule: &[Action<Object>]) -> Schedule<Object>
where
    Object: Clone,
{
    let aborted: HashSet<TransactionId> = schedule
        .iter()
        .filter(|action| matches!(action, Action::Abort { .. }))
        .map(Action::transaction)
        .collect();
    schedule
        .iter()
        .filter(|action| !aborted.contains(&action.transaction()))
        .cloned()
        .collect()
}

/// Appends a synthetic `Commit` for every transaction that has neither a
/// `Commit` nor an `Abort` in the schedule.
///
/// Commits are appended in first-appearance order of the transaction id,
/// so every transaction in the result has a determinate termination.
#[must_use]
pub fn add_commits<Object>(schedule: &[Action<Object>]) -> Schedule<Object>
where
    Object: Clone,
{
    let terminated: HashSet<TransactionId> = schedule
        .iter()
        .filter(|action| matches!(action, Action::Commit { .. } | Action::Abort { .. }))
        .map(Action::transaction)
        .collect();
    let mut extended: Schedule<Object> = schedule.to_vec();
    extended.extend(
        transaction_ids(schedule)
            .into_iter()
            .filter(|id| !terminated.contains(id))
            .map(Action::commit),
    );
    extended
}

/// Pairs each action with its zero-based position among its own
/// transaction's actions, preserving global order.
///
/// The numbering disambiguates repeated actions, e.g. a transaction that
/// writes the same object twice.
#[must_use]
pub fn number<Object>(schedule: &[Action<Object>]) -> Vec<(usize, Action<Object>)>
where
    Object: Clone,
{
    let mut counters: HashMap<TransactionId, usize> = HashMap::new();
    schedule
        .iter()
        .map(|action| {
            let counter = counters.entry(action.transaction()).or_insert(0);
            let position = *counter;
            *counter += 1;
            (position, action.clone())
        })
        .collect()
}
