use core::fmt::{Debug, Display, Formatter, Result};
use core::hash::Hash;

use crate::schedule::types::Action;

pub mod conflict;
pub mod recovery;
pub mod view;

pub use conflict::{conflict_graph, conflict_serializable};
pub use recovery::{aca, recoverable, strict};
pub use view::{view_equivalent, view_serializable};

/// Correctness criteria a schedule can be classified against.
///
/// The serializability criteria compare the schedule to serial executions;
/// the recovery criteria constrain when transactions may observe each
/// other's writes relative to commits. The recovery criteria form a strict
/// chain: strict implies ACA implies recoverable.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Property {
    /// View-equivalent to some serial schedule over the same transactions.
    ViewSerializable,
    /// The conflict graph is acyclic.
    ConflictSerializable,
    /// Transactions commit only after everything they read from commits.
    Recoverable,
    /// No transaction reads a still-uncommitted write.
    AvoidsCascadingAborts,
    /// No transaction reads or overwrites a still-uncommitted write.
    Strict,
}

/// Check whether a schedule satisfies one [`Property`].
///
/// Total over well-formed schedules: every call is deterministic,
/// side-effect free, and allocates only call-local state.
pub fn check<Object>(schedule: &[Action<Object>], property: Property) -> bool
where
    Object: Eq + Hash + Clone + Debug,
{
    tracing::debug!(actions = schedule.len(), ?property, "classifying schedule");

    match property {
        Property::ViewSerializable => view::view_serializable(schedule),
        Property::ConflictSerializable => conflict::conflict_serializable(schedule),
        Property::Recoverable => recovery::recoverable(schedule),
        Property::AvoidsCascadingAborts => recovery::aca(schedule),
        Property::Strict => recovery::strict(schedule),
    }
}

/// Result of classifying one schedule against all five criteria.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Characterization {
    pub view_serializable: bool,
    pub conflict_serializable: bool,
    pub recoverable: bool,
    pub avoids_cascading_aborts: bool,
    pub strict: bool,
}

impl Characterization {
    /// Property values in the fixed display order.
    #[must_use]
    pub const fn as_array(&self) -> [(Property, bool); 5] {
        [
            (Property::ViewSerializable, self.view_serializable),
            (Property::ConflictSerializable, self.conflict_serializable),
            (Property::Recoverable, self.recoverable),
            (Property::AvoidsCascadingAborts, self.avoids_cascading_aborts),
            (Property::Strict, self.strict),
        ]
    }
}

impl Display for Characterization {
    /// Compact `T`/`F` flags in the order VS, CS, REC, ACA, ST.
    fn fmt(&self, f: &mut Formatter) -> Result {
        let mut first = true;
        for (_, value) in self.as_array() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", if value { "T" } else { "F" })?;
            first = false;
        }
        Ok(())
    }
}

/// Classify a schedule against all five criteria at once.
#[must_use]
pub fn characterize<Object>(schedule: &[Action<Object>]) -> Characterization
where
    Object: Eq + Hash + Clone + Debug,
{
    Characterization {
        view_serializable: view::view_serializable(schedule),
        conflict_serializable: conflict::conflict_serializable(schedule),
        recoverable: recovery::recoverable(schedule),
        avoids_cascading_aborts: recovery::aca(schedule),
        strict: recovery::strict(schedule),
    }
}
