//! DSL macros for building test schedules.
//!
//! Produces `Vec<Action<&'static str>>`.
//!
//! # Syntax
//!
//! ```ignore
//! sched![r(1, X), w(2, X), c(2), a(1)]
//! ```
//!
//! - `r(t, OBJ)` → `Action::read(TransactionId(t), "OBJ")`
//! - `w(t, OBJ)` → `Action::write(TransactionId(t), "OBJ")`
//! - `c(t)`      → `Action::commit(TransactionId(t))`
//! - `a(t)`      → `Action::abort(TransactionId(t))`

/// Build a single Action.
#[macro_export]
macro_rules! act {
    (r($t:expr, $obj:ident)) => {
        schedcheck_core::schedule::types::Action::<&'static str>::read(
            schedcheck_core::schedule::types::TransactionId($t),
            stringify!($obj),
        )
    };
    (w($t:expr, $obj:ident)) => {
        schedcheck_core::schedule::types::Action::<&'static str>::write(
            schedcheck_core::schedule::types::TransactionId($t),
            stringify!($obj),
        )
    };
    (c($t:expr)) => {
        schedcheck_core::schedule::types::Action::<&'static str>::commit(
            schedcheck_core::schedule::types::TransactionId($t),
        )
    };
    (a($t:expr)) => {
        schedcheck_core::schedule::types::Action::<&'static str>::abort(
            schedcheck_core::schedule::types::TransactionId($t),
        )
    };
}

/// Build a full schedule from action shorthands.
#[macro_export]
macro_rules! sched {
    ($($kind:ident($($args:tt)*)),* $(,)?) => {
        vec![$($crate::act!($kind($($args)*))),*]
    };
}
