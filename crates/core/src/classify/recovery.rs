//! Recovery-property classifiers: recoverable, ACA, strict.
//!
//! Each classifier first closes every open transaction with a synthetic
//! commit, then makes one pass over the extended schedule with small
//! per-call state: an object-to-writer history and a committed set. Each
//! returns `false` at the first violation.
//!
//! On abort, the aborting transaction is purged from every object's
//! writer history, so later lookups no longer observe it as a writer.
//! In `recoverable`, read-from dependencies already recorded against the
//! aborter are deliberately NOT retracted; the asymmetry is part of the
//! contract and pinned by a regression test.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::schedule::decompose::add_commits;
use crate::schedule::types::{Action, TransactionId};

/// Most recent surviving writer of an object, if it is another transaction.
fn foreign_writer<Object>(
    written_by: &HashMap<Object, Vec<TransactionId>>,
    object: &Object,
    reader: TransactionId,
) -> Option<TransactionId>
where
    Object: Eq + Hash,
{
    written_by
        .get(object)
        .and_then(|writers| writers.last())
        .copied()
        .filter(|&writer| writer != reader)
}

/// Removes an aborting transaction from every object's writer history.
fn purge_writer<Object>(
    written_by: &mut HashMap<Object, Vec<TransactionId>>,
    aborted: TransactionId,
) {
    for writers in written_by.values_mut() {
        writers.retain(|&writer| writer != aborted);
    }
}

/// A schedule is recoverable if every transaction commits only after every
/// transaction it read from has committed.
///
/// Read-from dependencies are recorded when a read observes another
/// transaction's most recent write, and checked at the reader's commit.
#[must_use]
pub fn recoverable<Object>(schedule: &[Action<Object>]) -> bool
where
    Object: Eq + Hash + Clone,
{
    let schedule = add_commits(schedule);

    let mut written_by: HashMap<Object, Vec<TransactionId>> = HashMap::new();
    let mut read_from: HashMap<TransactionId, HashSet<TransactionId>> = HashMap::new();
    let mut committed: HashSet<TransactionId> = HashSet::new();

    for action in &schedule {
        match action {
            Action::Write {
                transaction,
                object,
            } => {
                written_by
                    .entry(object.clone())
                    .or_default()
                    .push(*transaction);
            }
            Action::Read {
                transaction,
                object,
            } => {
                if let Some(writer) = foreign_writer(&written_by, object, *transaction) {
                    read_from.entry(*transaction).or_default().insert(writer);
                }
            }
            Action::Commit { transaction } => {
                if let Some(dependencies) = read_from.get(transaction) {
                    if !dependencies.iter().all(|dep| committed.contains(dep)) {
                        return false;
                    }
                }
                committed.insert(*transaction);
            }
            Action::Abort { transaction } => {
                // Future reads no longer see the aborter as a writer, but
                // dependencies other transactions already recorded on it
                // stay in place.
                purge_writer(&mut written_by, *transaction);
            }
        }
    }

    true
}

/// A schedule avoids cascading aborts if no transaction ever reads data
/// written by a still-uncommitted transaction.
///
/// Stricter in timing than [`recoverable`]: the violation is detected at
/// the read itself, not at the reader's commit.
#[must_use]
pub fn aca<Object>(schedule: &[Action<Object>]) -> bool
where
    Object: Eq + Hash + Clone,
{
    let schedule = add_commits(schedule);

    let mut written_by: HashMap<Object, Vec<TransactionId>> = HashMap::new();
    let mut committed: HashSet<TransactionId> = HashSet::new();

    for action in &schedule {
        match action {
            Action::Write {
                transaction,
                object,
            } => {
                written_by
                    .entry(object.clone())
                    .or_default()
                    .push(*transaction);
            }
            Action::Read {
                transaction,
                object,
            } => {
                if let Some(writer) = foreign_writer(&written_by, object, *transaction) {
                    if !committed.contains(&writer) {
                        return false;
                    }
                }
            }
            Action::Commit { transaction } => {
                committed.insert(*transaction);
            }
            Action::Abort { transaction } => {
                purge_writer(&mut written_by, *transaction);
            }
        }
    }

    true
}

/// A schedule is strict if no transaction ever reads or overwrites data
/// written by a still-uncommitted transaction.
#[must_use]
pub fn strict<Object>(schedule: &[Action<Object>]) -> bool
where
    Object: Eq + Hash + Clone,
{
    let schedule = add_commits(schedule);

    let mut written_by: HashMap<Object, Vec<TransactionId>> = HashMap::new();
    let mut committed: HashSet<TransactionId> = HashSet::new();

    for action in &schedule {
        match action {
            Action::Read {
                transaction,
                object,
            }
            | Action::Write {
                transaction,
                object,
            } => {
                if let Some(writer) = foreign_writer(&written_by, object, *transaction) {
                    if !committed.contains(&writer) {
                        return false;
                    }
                }
                if action.is_write() {
                    written_by
                        .entry(object.clone())
                        .or_default()
                        .push(*transaction);
                }
            }
            Action::Commit { transaction } => {
                committed.insert(*transaction);
            }
            Action::Abort { transaction } => {
                purge_writer(&mut written_by, *transaction);
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn r(t: u64, object: &'static str) -> Action<&'static str> {
        Action::read(TransactionId(t), object)
    }

    fn w(t: u64, object: &'static str) -> Action<&'static str> {
        Action::write(TransactionId(t), object)
    }

    fn c(t: u64) -> Action<&'static str> {
        Action::commit(TransactionId(t))
    }

    fn a(t: u64) -> Action<&'static str> {
        Action::abort(TransactionId(t))
    }

    #[test]
    fn test_single_transaction_trivially_strict() {
        let schedule = vec![w(1, "A"), r(1, "A"), c(1)];
        assert!(recoverable(&schedule));
        assert!(aca(&schedule));
        assert!(strict(&schedule));
    }

    #[test]
    fn test_commit_before_dependency_commits() {
        // T2 reads T1's uncommitted write and commits first.
        let schedule = vec![w(1, "X"), r(2, "X"), c(2), c(1)];
        assert!(!recoverable(&schedule));
        assert!(!aca(&schedule));
        assert!(!strict(&schedule));
    }

    #[test]
    fn test_dirty_read_but_commit_ordered() {
        // T2 reads T1's uncommitted write but commits after T1:
        // recoverable, yet the dirty read itself breaks ACA.
        let schedule = vec![w(1, "X"), r(2, "X"), c(1), c(2)];
        assert!(recoverable(&schedule));
        assert!(!aca(&schedule));
        assert!(!strict(&schedule));
    }

    #[test]
    fn test_dirty_write_breaks_only_strict() {
        // T2 overwrites T1's uncommitted write without reading it.
        let schedule = vec![w(1, "X"), w(2, "X"), c(1), c(2)];
        assert!(recoverable(&schedule));
        assert!(aca(&schedule));
        assert!(!strict(&schedule));
    }

    #[test]
    fn test_abort_purges_write_history() {
        // After T2 aborts, T1's read observes no foreign writer.
        let schedule = vec![w(2, "A"), a(2), r(1, "A"), c(1)];
        assert!(recoverable(&schedule));
        assert!(aca(&schedule));
        assert!(strict(&schedule));
    }

    #[test]
    fn test_open_transactions_get_synthetic_commits() {
        // Neither transaction terminates; the synthetic commits close T1
        // then T2, which is the order their first actions appear, and T2
        // read from T1, so the dependency is satisfied.
        let schedule = vec![w(1, "X"), r(2, "X")];
        assert!(recoverable(&schedule));
    }

    #[test]
    fn test_recoverable_dependency_survives_abort() {
        // T2 reads T1's write, then T1 aborts. The dependency on T1 was
        // already recorded and is not retracted, so T2's commit still
        // finds an uncommitted dependency.
        let schedule = vec![w(1, "X"), r(2, "X"), a(1), c(2)];
        assert!(!recoverable(&schedule));
    }
}
