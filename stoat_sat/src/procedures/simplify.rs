/*!
Top-level simplification.

Runs only at decision level zero, between restarts. Propagation is brought
to fixed point first; a conflict here proves the formula unsatisfiable
outright. Otherwise clauses satisfied by the top-level valuation are
removed, false literals are cut out of surviving clauses, released
variables are compacted off the trail and handed to the free list, and the
branching order is rebuilt over what remains.

The work is skipped when nothing was assigned or propagated since the last
round, tracked by two watermarks.
*/

use crate::{
    misc::log::targets,
    solver::{Seen, Solver},
    structures::LBool,
};

impl Solver {
    /// Simplifies the clause database with the top-level assignment.
    /// False only when the formula is unsatisfiable.
    pub fn simplify(&mut self) -> bool {
        debug_assert_eq!(self.trail.level(), 0);
        if !self.ok || self.propagate().is_some() {
            self.ok = false;
            return false;
        }

        if self.n_assigns() as i64 == self.simp_db_assigns || self.simp_db_props > 0 {
            return true;
        }

        log::info!(target: targets::SIMPLIFY, "Simplifying with {} top-level assignments", self.n_assigns());

        self.remove_satisfied(true);
        if self.config.remove_satisfied {
            self.remove_satisfied(false);

            // Released variables are now permanent facts; take them off the
            // trail and recycle their indices.
            for &v in self.released_vars.iter() {
                debug_assert_eq!(self.seen[v as usize], Seen::Undef);
                self.seen[v as usize] = Seen::Source;
            }
            let mut kept = 0;
            for i in 0..self.trail.len() {
                let lit = self.trail.assignments[i];
                if self.seen[lit.var() as usize] == Seen::Undef {
                    self.trail.assignments[kept] = lit;
                    kept += 1;
                }
            }
            self.trail.assignments.truncate(kept);
            self.trail.q_head = self.trail.len();
            for &v in self.released_vars.iter() {
                self.seen[v as usize] = Seen::Undef;
            }
            let released = std::mem::take(&mut self.released_vars);
            self.free_vars.extend(released);
        }

        self.check_garbage();
        self.rebuild_order();

        self.simp_db_assigns = self.n_assigns() as i64;
        self.simp_db_props = (self.clauses_literals + self.learnts_literals) as i64;
        true
    }

    /// Removes clauses satisfied at the top level from one roster, and
    /// shortens the survivors by their false literals.
    fn remove_satisfied(&mut self, learnt: bool) {
        let mut roster = std::mem::take(match learnt {
            true => &mut self.learnts,
            false => &mut self.clauses,
        });

        let mut kept = 0;
        for i in 0..roster.len() {
            let cref = roster[i];
            if self.satisfied(cref) {
                self.remove_clause(cref);
                continue;
            }
            // The watched pair is unassigned here, or the clause would have
            // been satisfied or propagated at level zero.
            debug_assert!(self.value(self.ca.lit(cref, 0)) == LBool::Undef);
            debug_assert!(self.value(self.ca.lit(cref, 1)) == LBool::Undef);
            let mut k = 2;
            while k < self.ca.size(cref) {
                if self.value(self.ca.lit(cref, k)) == LBool::False {
                    self.ca.remove_lit(cref, k);
                } else {
                    k += 1;
                }
            }
            roster[kept] = cref;
            kept += 1;
        }
        roster.truncate(kept);

        match learnt {
            true => self.learnts = roster,
            false => self.clauses = roster,
        }
    }

    /// Rebuilds the branching order over unassigned decision variables.
    pub(crate) fn rebuild_order(&mut self) {
        let eligible: Vec<usize> = (0..self.n_vars())
            .filter(|&v| self.decision[v as usize] && self.value_var(v) == LBool::Undef)
            .map(|v| v as usize)
            .collect();
        self.order.rebuild(eligible);
    }
}
