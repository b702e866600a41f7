use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter, Result};

/// Unique identifier for a transaction within a schedule.
///
/// Transaction ids are positive integers assigned by whoever built the
/// schedule. They are stable across every derived view of a schedule
/// (partitions, abort-filtered copies, numbered copies).
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(::derive_more::From, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub u64);

impl Debug for TransactionId {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "T{}", self.0)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.0)
    }
}

/// A single step of an interleaved execution history.
///
/// Reads and writes name the object they touch; commits and aborts only
/// name their transaction. The four variants are a closed set: every
/// consumer matches all of them, so an unrecognized operation kind cannot
/// exist past construction.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action<Object> {
    Read {
        transaction: TransactionId,
        object: Object,
    },
    Write {
        transaction: TransactionId,
        object: Object,
    },
    Commit {
        transaction: TransactionId,
    },
    Abort {
        transaction: TransactionId,
    },
}

impl<Object> Action<Object> {
    pub const fn read(transaction: TransactionId, object: Object) -> Self {
        Self::Read {
            transaction,
            object,
        }
    }

    pub const fn write(transaction: TransactionId, object: Object) -> Self {
        Self::Write {
            transaction,
            object,
        }
    }

    pub const fn commit(transaction: TransactionId) -> Self {
        Self::Commit { transaction }
    }

    pub const fn abort(transaction: TransactionId) -> Self {
        Self::Abort { transaction }
    }

    /// The transaction this action belongs to.
    #[must_use]
    pub const fn transaction(&self) -> TransactionId {
        match self {
            Self::Read { transaction, .. }
            | Self::Write { transaction, .. }
            | Self::Commit { transaction }
            | Self::Abort { transaction } => *transaction,
        }
    }

    /// The object a read or write touches. Commits and aborts have none.
    #[must_use]
    pub const fn object(&self) -> Option<&Object> {
        match self {
            Self::Read { object, .. } | Self::Write { object, .. } => Some(object),
            Self::Commit { .. } | Self::Abort { .. } => None,
        }
    }

    /// `true` for `Write` actions.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

impl<Object> Debug for Action<Object>
where
    Object: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Read {
                transaction,
                object,
            } => write!(f, "R{transaction}({object:?})"),
            Self::Write {
                transaction,
                object,
            } => write!(f, "W{transaction}({object:?})"),
            Self::Commit { transaction } => write!(f, "C{transaction}"),
            Self::Abort { transaction } => write!(f, "A{transaction}"),
        }
    }
}

impl<Object> Display for Action<Object>
where
    Object: Display,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Read {
                transaction,
                object,
            } => write!(f, "R{transaction}({object})"),
            Self::Write {
                transaction,
                object,
            } => write!(f, "W{transaction}({object})"),
            Self::Commit { transaction } => write!(f, "C{transaction}"),
            Self::Abort { transaction } => write!(f, "A{transaction}"),
        }
    }
}

/// One total interleaving of operations from possibly many transactions.
///
/// Schedules are immutable inputs to every classifier; derivation helpers
/// return fresh values and never mutate in place.
pub type Schedule<Object> = Vec<Action<Object>>;

#[cfg(test)]
mod tests {
    use super::*;

    const T1: TransactionId = TransactionId(1);
    const T2: TransactionId = TransactionId(2);

    #[test]
    fn test_structural_equality() {
        assert_eq!(Action::read(T1, "A"), Action::read(T1, "A"));
        assert_eq!(Action::write(T1, "A"), Action::write(T1, "A"));
        assert_eq!(Action::<&str>::commit(T1), Action::commit(T1));
        assert_eq!(Action::<&str>::abort(T1), Action::abort(T1));

        assert_ne!(Action::read(T1, "A"), Action::read(T2, "A"));
        assert_ne!(Action::read(T1, "A"), Action::read(T1, "B"));
        assert_ne!(Action::read(T1, "A"), Action::write(T1, "A"));
        assert_ne!(Action::<&str>::commit(T1), Action::abort(T1));
    }

    #[test]
    fn test_accessors() {
        let read = Action::read(T1, "A");
        assert_eq!(read.transaction(), T1);
        assert_eq!(read.object(), Some(&"A"));
        assert!(!read.is_write());

        let write = Action::write(T2, "B");
        assert_eq!(write.transaction(), T2);
        assert_eq!(write.object(), Some(&"B"));
        assert!(write.is_write());

        let commit = Action::<&str>::commit(T1);
        assert_eq!(commit.transaction(), T1);
        assert_eq!(commit.object(), None);

        let abort = Action::<&str>::abort(T2);
        assert_eq!(abort.transaction(), T2);
        assert_eq!(abort.object(), None);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", Action::read(T1, "A")), "R1(\"A\")");
        assert_eq!(format!("{:?}", Action::write(T2, "X")), "W2(\"X\")");
        assert_eq!(format!("{:?}", Action::<&str>::commit(T1)), "C1");
        assert_eq!(format!("{:?}", Action::<&str>::abort(T2)), "A2");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format!("{}", Action::read(T1, "A")), "R1(A)");
        assert_eq!(format!("{}", Action::write(T2, "X")), "W2(X)");
        assert_eq!(format!("{}", Action::<&str>::commit(T1)), "C1");
        assert_eq!(format!("{}", Action::<&str>::abort(T2)), "A2");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_schedule_json_round_trip() {
        let schedule: Schedule<&str> = vec![
            Action::read(T1, "X"),
            Action::write(T2, "X"),
            Action::commit(T2),
            Action::abort(T1),
        ];
        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule<String> = serde_json::from_str(&json).unwrap();
        let expected: Schedule<String> = schedule
            .iter()
            .map(|action| match action {
                Action::Read {
                    transaction,
                    object,
                } => Action::read(*transaction, (*object).to_string()),
                Action::Write {
                    transaction,
                    object,
                } => Action::write(*transaction, (*object).to_string()),
                Action::Commit { transaction } => Action::commit(*transaction),
                Action::Abort { transaction } => Action::abort(*transaction),
            })
            .collect();
        assert_eq!(back, expected);
    }
}
