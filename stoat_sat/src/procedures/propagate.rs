/*!
Unit propagation.

Propagates every fact on the trail above the queue head to fixed point,
keeping the watched-literal invariant: the first two literals of an
attached clause are never both false unless the clause is the conflict
being reported.

For each newly true literal `p`, the watchers of `p` are rewritten in
place. A watcher survives untouched when its blocker is already true.
Otherwise the clause is normalised so slot 1 holds `!p`, and:

- a true slot 0 keeps the watcher with slot 0 as the fresh blocker;
- a non-false literal elsewhere in the clause is swapped into slot 1 and
  the watch moves to it;
- with no replacement the clause asserts slot 0, or, if slot 0 is false,
  is the conflict --- propagation stops and the remaining watchers are
  flushed back unchanged.

The bucket for `p` is detached from the table while it is rewritten.
Watches added during the scan always land on some other bucket: the moved
watch goes to a literal that is not false, and every literal in the bucket
for `p` is false by construction.
*/

use crate::{
    db::{clause::ClauseRef, watches::Watcher},
    misc::log::targets,
    solver::{counters::Counters, Solver},
    structures::LBool,
};

impl Solver {
    /// Propagates all enqueued facts, returning the conflicting clause if
    /// one is found. The propagation queue is empty afterwards either way.
    pub(crate) fn propagate(&mut self) -> Option<ClauseRef> {
        let mut confl: Option<ClauseRef> = None;
        let mut num_props: u64 = 0;

        while self.trail.q_head < self.trail.len() {
            let p = self.trail.assignments[self.trail.q_head];
            self.trail.q_head += 1;
            num_props += 1;

            self.watches.clean(p, &self.ca);
            let mut ws = std::mem::take(self.watches.occs_mut(p));
            let mut i = 0;
            let mut j = 0;

            'watchers: while i < ws.len() {
                let Watcher { cref, blocker } = ws[i];
                if self.value(blocker) == LBool::True {
                    ws[j] = ws[i];
                    i += 1;
                    j += 1;
                    continue;
                }

                // Normalise: the falsified literal goes to slot 1.
                let false_lit = !p;
                {
                    let lits = self.ca.lits_mut(cref);
                    if lits[0] == false_lit {
                        lits.swap(0, 1);
                    }
                    debug_assert_eq!(lits[1], false_lit);
                }
                i += 1;

                let first = self.ca.lit(cref, 0);
                let w = Watcher::new(cref, first);
                if first != blocker && self.value(first) == LBool::True {
                    ws[j] = w;
                    j += 1;
                    continue;
                }

                let size = self.ca.size(cref);
                for k in 2..size {
                    let candidate = self.ca.lit(cref, k);
                    if self.value(candidate) != LBool::False {
                        let lits = self.ca.lits_mut(cref);
                        lits[1] = candidate;
                        lits[k] = false_lit;
                        self.watches.occs_mut(!candidate).push(w);
                        continue 'watchers;
                    }
                }

                // No replacement watch; the clause is unit or conflicting.
                ws[j] = w;
                j += 1;
                if self.value(first) == LBool::False {
                    log::trace!(target: targets::PROPAGATION, "Conflict in {cref:?} on {p}");
                    confl = Some(cref);
                    self.trail.q_head = self.trail.len();
                    while i < ws.len() {
                        ws[j] = ws[i];
                        j += 1;
                        i += 1;
                    }
                } else {
                    self.unchecked_enqueue(first, Some(cref));
                }
            }

            ws.truncate(j);
            *self.watches.occs_mut(p) = ws;
        }

        Counters::add(&self.counters.propagations, num_props);
        self.simp_db_props -= num_props as i64;
        confl
    }
}
