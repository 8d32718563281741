/*!
The cooperative snapshot hand-off.

The shared [counters](super::counters) are approximate by design. Some
derived metrics need a mutually consistent view of solver state --- for
instance a clause-to-variable ratio over the clauses not yet satisfied ---
and that view only exists between propagation finishing and the next
mutation.

The hand-off keeps all mutation single-threaded: an observer raises a
request flag and blocks; the search loop notices the flag at its top, where
propagation is complete and the state is stable, computes the [Snapshot]
itself, publishes it, and resumes. The observer never touches solver state.

A request raised while no search is running is answered at the start of the
next one, so observers should wait with a timeout.
*/

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Condvar, Mutex,
};

use crate::{solver::Solver, structures::LBool};

/// Engine state gathered at a stable point of the search loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snapshot {
    /// Original clauses not satisfied by the current valuation.
    pub live_clauses: u64,

    /// Distinct unassigned variables occurring in those clauses.
    pub live_vars: u64,

    /// `live_clauses / live_vars`, or zero when no variable is free.
    pub clause_variable_ratio: f64,

    /// Assignments on the trail.
    pub trail_len: usize,

    /// The current decision level.
    pub decision_level: u32,
}

#[derive(Default)]
pub struct SnapshotPoint {
    requested: AtomicBool,
    slot: Mutex<Option<Snapshot>>,
    ready: Condvar,
}

impl SnapshotPoint {
    /// Raises the request flag. Any previously published snapshot is
    /// discarded.
    pub fn request(&self) {
        let mut slot = self.slot.lock().expect("snapshot slot poisoned");
        *slot = None;
        self.requested.store(true, Ordering::Release);
    }

    /// Blocks until the engine publishes, or the timeout passes.
    pub fn wait(&self, timeout: std::time::Duration) -> Option<Snapshot> {
        let deadline = std::time::Instant::now() + timeout;
        let mut slot = self.slot.lock().expect("snapshot slot poisoned");
        while slot.is_none() {
            let left = deadline.checked_duration_since(std::time::Instant::now())?;
            let (guard, result) = self
                .ready
                .wait_timeout(slot, left)
                .expect("snapshot slot poisoned");
            slot = guard;
            if result.timed_out() && slot.is_none() {
                return None;
            }
        }
        slot.take()
    }

    pub(crate) fn requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        let mut slot = self.slot.lock().expect("snapshot slot poisoned");
        *slot = Some(snapshot);
        self.requested.store(false, Ordering::Release);
        self.ready.notify_all();
    }
}

impl Solver {
    /// Computes the snapshot served through [SnapshotPoint].
    ///
    /// Variables are counted once across all live clauses; a clause found
    /// satisfied contributes neither itself nor its variables.
    pub(crate) fn take_snapshot(&self) -> Snapshot {
        let mut counted = vec![false; self.n_vars() as usize];
        let mut live_clauses = 0u64;
        let mut live_vars = 0u64;
        let mut fresh = Vec::new();

        'clauses: for &cref in &self.clauses {
            if self.ca.is_removed(cref) {
                continue;
            }
            fresh.clear();
            for &lit in self.ca.lits(cref) {
                if self.value(lit) == LBool::True {
                    for &v in &fresh {
                        counted[v as usize] = false;
                        live_vars -= 1;
                    }
                    continue 'clauses;
                }
                let v = lit.var();
                if self.value_var(v) == LBool::Undef && !counted[v as usize] {
                    counted[v as usize] = true;
                    fresh.push(v);
                    live_vars += 1;
                }
            }
            live_clauses += 1;
        }

        Snapshot {
            live_clauses,
            live_vars,
            clause_variable_ratio: match live_vars {
                0 => 0.0,
                n => live_clauses as f64 / n as f64,
            },
            trail_len: self.trail.len(),
            decision_level: self.trail.level(),
        }
    }
}
