/*!
Learnt clause database reduction.

Learnt clauses beyond the dynamic limit slow propagation more than they
prune. When the limit is hit the roster is sorted worst-first --- long,
inactive clauses ahead of short, active ones --- and the bottom half is
removed, along with any further clause whose activity has decayed below
the mean increment. Binary clauses and clauses currently acting as a
reason are always kept.
*/

use crate::{misc::log::targets, solver::Solver};

impl Solver {
    pub(crate) fn reduce_db(&mut self) {
        let mut learnts = std::mem::take(&mut self.learnts);
        let before = learnts.len();

        // Clauses with low keep-priority first: activity ascending, binary
        // clauses last.
        learnts.sort_by(|&x, &y| {
            let keep_x = self.ca.size(x) == 2;
            let keep_y = self.ca.size(y) == 2;
            match (keep_x, keep_y) {
                (false, false) => self
                    .ca
                    .activity(x)
                    .partial_cmp(&self.ca.activity(y))
                    .unwrap_or(std::cmp::Ordering::Equal),
                (false, true) => std::cmp::Ordering::Less,
                (true, false) => std::cmp::Ordering::Greater,
                (true, true) => std::cmp::Ordering::Equal,
            }
        });

        let extra_lim = self.cla_inc / learnts.len() as f64;
        let mut kept = 0;
        for i in 0..learnts.len() {
            let cref = learnts[i];
            if self.ca.size(cref) > 2
                && !self.locked(cref)
                && (i < learnts.len() / 2 || self.ca.activity(cref) < extra_lim)
            {
                self.remove_clause(cref);
            } else {
                learnts[kept] = cref;
                kept += 1;
            }
        }
        learnts.truncate(kept);
        self.learnts = learnts;

        log::info!(target: targets::REDUCTION, "Reduced learnts from {before} to {kept}");
        self.check_garbage();
    }
}
