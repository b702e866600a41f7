//! Classification of transactional schedules.
//!
//! `schedcheck_core` decides whether an interleaved execution history (a
//! *schedule* of read/write/commit/abort actions) satisfies the standard
//! correctness criteria of concurrency-control theory:
//!
//! 1. **Conflict-serializable** -- the transaction-level conflict graph is
//!    acyclic.
//! 2. **View-serializable** -- the schedule is view-equivalent to some
//!    serial ordering of its transactions.
//! 3. **Recoverable** -- every transaction commits only after every
//!    transaction it read from has committed.
//! 4. **Avoids cascading aborts** -- no transaction ever reads a
//!    still-uncommitted write.
//! 5. **Strict** -- no transaction ever reads *or overwrites* a
//!    still-uncommitted write.
//!
//! Conflict-serializability is a polynomial-time cycle check on the
//! conflict graph. View-serializability falls back to a factorial
//! permutation search over serial orders when two exact shortcuts do not
//! settle the answer. The recovery criteria are single-pass streaming
//! checks over the schedule with synthetic commits appended.
//!
//! The engine is purely analytical: it never executes transactions or
//! enforces any concurrency control. Every classifier is a deterministic,
//! synchronous function from a schedule to a boolean with no shared state
//! between calls, so concurrent classification of independent schedules
//! needs no locking.
//!
//! # Entry points
//!
//! [`check()`] classifies one schedule against one [`Property`];
//! [`characterize()`] evaluates all five at once:
//!
//! ```rust,ignore
//! use schedcheck_core::{characterize, check, Property};
//!
//! let verdict = check(&schedule, Property::ConflictSerializable);
//! let all_five = characterize(&schedule);
//! println!("{all_five}");
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on core types
//!   (`Action`, `TransactionId`, `DiGraph`, `Property`, `Characterization`).
//!
//! This crate is `no_std` compatible (requires `alloc`). The schedule text
//! notation parser lives in the separate `schedcheck_parser` crate.

#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod classify;
pub mod graph;
pub mod schedule;

pub use classify::{characterize, check, Characterization, Property};
pub use schedule::{Action, Schedule, TransactionId};
