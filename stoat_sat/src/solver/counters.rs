/*!
Counters shared with observers.

A solver hands out clones of a reference-counted [Counters] so that a
metrics thread can sample a live solve. Every field is a relaxed atomic: individual reads
are safe from word tearing, and nothing more is promised --- counters are
written at different points of the search loop and a reader may see any
interleaving. Observers needing a mutually consistent view go through the
[snapshot hand-off](crate::solver::observe) instead.
*/

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Default)]
pub struct Counters {
    /// Branching decisions made.
    pub decisions: AtomicU64,

    /// Decisions taken by random pick rather than activity order.
    pub rnd_decisions: AtomicU64,

    /// Literals propagated.
    pub propagations: AtomicU64,

    /// Conflicts found.
    pub conflicts: AtomicU64,

    /// Completed restarts.
    pub restarts: AtomicU64,

    /// Original clauses currently attached.
    pub num_clauses: AtomicU64,

    /// Learnt clauses currently attached.
    pub num_learnts: AtomicU64,

    /// Garbage collections performed.
    pub gc_events: AtomicU64,

    /// Set once a verdict has been reached.
    pub solved: AtomicBool,
}

impl Counters {
    pub(crate) fn add(field: &AtomicU64, n: u64) {
        field.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn sub(field: &AtomicU64, n: u64) {
        field.fetch_sub(n, Ordering::Relaxed);
    }

    pub fn get(field: &AtomicU64) -> u64 {
        field.load(Ordering::Relaxed)
    }
}
