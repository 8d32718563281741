/*!
Backtracking.

Undoes assignments down to a target level, saving polarities for later
branching and returning the freed variables to the branching order. The
propagation queue head retreats with the trail, so anything unpropagated at
the target level will be propagated again.
*/

use crate::{
    config::PhaseSaving,
    misc::log::targets,
    solver::Solver,
    structures::LBool,
};

impl Solver {
    /// Reverts state to `level`, if the trail is above it.
    pub(crate) fn cancel_until(&mut self, level: u32) {
        if self.trail.level() <= level {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {level}", self.trail.level());

        let keep = self.trail.level_start(level);
        let top = self.trail.level_start(self.trail.level() - 1);
        for c in (keep..self.trail.len()).rev() {
            let lit = self.trail.assignments[c];
            let x = lit.var();
            self.assigns[x as usize] = LBool::Undef;
            match self.config.phase_saving {
                PhaseSaving::Full => self.polarity[x as usize] = lit.polarity(),
                PhaseSaving::Limited if c > top => self.polarity[x as usize] = lit.polarity(),
                _ => {}
            }
            self.insert_var_order(x);
        }
        self.trail.q_head = keep;
        self.trail.assignments.truncate(keep);
        self.trail.level_indices.truncate(level as usize);
    }
}
