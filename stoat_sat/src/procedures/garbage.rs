/*!
Garbage collection of the clause arena.

Free space in the arena is only accounted, never reused, so after enough
clause removal the region is mostly dead words. Collection copies every
live record into a fresh region sized to fit and rewrites each reference
root: watcher entries (after cleaning the smudged buckets), reasons of
assigned variables, and the original and learnt rosters. Forwarding
offsets left in the source make repeated references converge on one
target, after which the regions are swapped.

Should the fresh region fail to allocate the solver keeps the old region
--- still fully valid --- but flags itself out of memory, and the running
solve returns indeterminate at the next budget check.
*/

use crate::{
    db::clause::ClauseArena,
    misc::log::targets,
    solver::{counters::Counters, Solver},
    types::err::OutOfMemory,
};

impl Solver {
    /// Collects when the wasted share of the arena exceeds the configured
    /// fraction.
    pub(crate) fn check_garbage(&mut self) {
        if self.ca.wasted() as f64 > self.ca.len() as f64 * self.config.garbage_frac {
            if self.garbage_collect().is_err() {
                self.oom = true;
            }
        }
    }

    pub(crate) fn garbage_collect(&mut self) -> Result<(), OutOfMemory> {
        let mut to = ClauseArena::with_capacity(self.ca.len() - self.ca.wasted());
        self.reloc_all(&mut to)?;
        log::info!(
            target: targets::GC,
            "Collected garbage: {} words to {} words",
            self.ca.len(),
            to.len()
        );
        self.ca = to;
        Counters::add(&self.counters.gc_events, 1);
        Ok(())
    }

    fn reloc_all(&mut self, to: &mut ClauseArena) -> Result<(), OutOfMemory> {
        // Watchers. Cleaning first drops entries for removed clauses, so
        // everything left is live.
        self.watches.clean_all(&self.ca);
        for bucket in 0..self.watches.bucket_count() {
            for watcher in self.watches.bucket_mut(bucket).iter_mut() {
                self.ca.reloc(&mut watcher.cref, to)?;
            }
        }

        // Reasons. A reason already relocated through its watchers, or
        // locked in place, moves; a reason whose clause was removed is
        // dropped so no reference into the old region survives.
        for index in 0..self.trail.len() {
            let v = self.trail.assignments[index].var();
            let Some(reason) = self.reason(v) else {
                continue;
            };
            if self.ca.is_removed(reason) {
                self.vardata[v as usize].reason = None;
            } else {
                let mut cref = reason;
                self.ca.reloc(&mut cref, to)?;
                self.vardata[v as usize].reason = Some(cref);
            }
        }

        // The rosters, dropping removed entries.
        let mut learnts = std::mem::take(&mut self.learnts);
        let mut kept = 0;
        for i in 0..learnts.len() {
            if !self.ca.is_removed(learnts[i]) {
                self.ca.reloc(&mut learnts[i], to)?;
                learnts[kept] = learnts[i];
                kept += 1;
            }
        }
        learnts.truncate(kept);
        self.learnts = learnts;

        let mut clauses = std::mem::take(&mut self.clauses);
        let mut kept = 0;
        for i in 0..clauses.len() {
            if !self.ca.is_removed(clauses[i]) {
                self.ca.reloc(&mut clauses[i], to)?;
                clauses[kept] = clauses[i];
                kept += 1;
            }
        }
        clauses.truncate(kept);
        self.clauses = clauses;

        Ok(())
    }
}
