/*!
Conflict analysis.

From a conflicting clause, `analyze` walks the trail backwards resolving
on reasons until exactly one literal of the current decision level remains
--- the first unique implication point. The negated UIP heads the derived
clause, which asserts it after backjumping to the highest level among the
remaining literals.

Minimisation then strips redundant literals. A literal is redundant when
its reason resolves away against the clause itself: in the basic mode only
direct reasons are inspected, in the deep mode `lit_redundant` chases
reasons recursively with an explicit stack, caching outcomes in the
scratch marks so shared subtrees are walked once.

The scratch marks are shared with `analyze_final`; each routine leaves
them all clear on return.
*/

use crate::{
    db::clause::ClauseRef,
    misc::log::targets,
    solver::{Seen, Solver},
    structures::Lit,
};

impl Solver {
    /// Derives an asserting clause from `confl` into `out_learnt` and
    /// returns the backjump level.
    ///
    /// `out_learnt[0]` is the asserting literal; with more than one
    /// literal, `out_learnt[1]` carries the greatest level of the rest.
    /// Callable only above decision level zero.
    pub(crate) fn analyze(&mut self, confl: ClauseRef, out_learnt: &mut Vec<Lit>) -> u32 {
        debug_assert!(self.trail.level() > 0);
        out_learnt.clear();

        let mut path_c: u32 = 0;
        let mut p: Option<Lit> = None;
        let mut confl = Some(confl);
        let mut index = self.trail.len();

        loop {
            let cref = confl.expect("assigned by a reason during analysis");
            if self.ca.is_learnt(cref) {
                self.cla_bump_activity(cref);
            }

            // On later rounds slot 0 holds the literal being resolved on.
            let start = match p {
                None => 0,
                Some(_) => 1,
            };
            for k in start..self.ca.size(cref) {
                let q = self.ca.lit(cref, k);
                let v = q.var();
                if self.seen[v as usize] == Seen::Undef && self.level(v) > 0 {
                    self.var_bump_activity(v);
                    self.seen[v as usize] = Seen::Source;
                    if self.level(v) >= self.trail.level() {
                        path_c += 1;
                    } else {
                        out_learnt.push(q);
                    }
                }
            }

            // Next marked literal, scanning the trail tip-first.
            loop {
                index -= 1;
                if self.seen[self.trail.assignments[index].var() as usize] != Seen::Undef {
                    break;
                }
            }
            let pivot = self.trail.assignments[index];
            confl = self.reason(pivot.var());
            self.seen[pivot.var() as usize] = Seen::Undef;
            path_c -= 1;
            p = Some(pivot);

            if path_c == 0 {
                break;
            }
        }

        let uip = p.expect("analysis visits at least one literal");
        out_learnt.insert(0, !uip);

        self.analyze_toclear.clear();
        self.analyze_toclear.extend_from_slice(out_learnt);
        self.max_literals += out_learnt.len() as u64;

        match self.config.ccmin_mode {
            crate::config::CcMin::Deep => {
                let mut j = 1;
                for i in 1..out_learnt.len() {
                    let lit = out_learnt[i];
                    if self.reason(lit.var()).is_none() || !self.lit_redundant(lit) {
                        out_learnt[j] = lit;
                        j += 1;
                    }
                }
                out_learnt.truncate(j);
            }
            crate::config::CcMin::Basic => {
                let mut j = 1;
                for i in 1..out_learnt.len() {
                    let lit = out_learnt[i];
                    if self.basic_redundant(lit) {
                        continue;
                    }
                    out_learnt[j] = lit;
                    j += 1;
                }
                out_learnt.truncate(j);
            }
            crate::config::CcMin::None => {}
        }

        self.tot_literals += out_learnt.len() as u64;

        // Backjump to the second-highest level in the clause, placing a
        // literal of that level at slot 1 where the watch will sit.
        let out_btlevel = match out_learnt.len() {
            1 => 0,
            _ => {
                let mut max_i = 1;
                for i in 2..out_learnt.len() {
                    if self.level(out_learnt[i].var()) > self.level(out_learnt[max_i].var()) {
                        max_i = i;
                    }
                }
                out_learnt.swap(1, max_i);
                self.level(out_learnt[1].var())
            }
        };

        for &lit in self.analyze_toclear.iter() {
            self.seen[lit.var() as usize] = Seen::Undef;
        }
        log::trace!(target: targets::ANALYSIS, "Learnt {out_learnt:?}, backjump to {out_btlevel}");

        out_btlevel
    }

    /// The basic redundancy check: every reason literal above level zero
    /// already sits in the derived clause.
    fn basic_redundant(&self, lit: Lit) -> bool {
        match self.reason(lit.var()) {
            None => false,
            Some(cref) => {
                for k in 1..self.ca.size(cref) {
                    let q = self.ca.lit(cref, k);
                    if self.seen[q.var() as usize] == Seen::Undef && self.level(q.var()) > 0 {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// The deep redundancy check: `lit` is redundant when every literal in
    /// its reason is at level zero, in the derived clause, or itself
    /// redundant.
    ///
    /// Outcomes are cached in the scratch marks --- `Removable` for
    /// literals whose reasons resolved away, `Failed` for the chain that
    /// blocked removal --- so overlapping reason trees cost one visit. The
    /// extra marks are queued for the clearing pass of
    /// [analyze](Solver::analyze).
    pub(crate) fn lit_redundant(&mut self, lit: Lit) -> bool {
        debug_assert!(matches!(
            self.seen[lit.var() as usize],
            Seen::Undef | Seen::Source
        ));
        debug_assert!(self.reason(lit.var()).is_some());

        self.analyze_stack.clear();
        let mut p = lit;
        let mut cref = self.reason(p.var()).expect("checked above");
        let mut i: u32 = 1;

        loop {
            if (i as usize) < self.ca.size(cref) {
                let l = self.ca.lit(cref, i as usize);
                let v = l.var();

                if self.level(v) == 0
                    || self.seen[v as usize] == Seen::Source
                    || self.seen[v as usize] == Seen::Removable
                {
                    i += 1;
                    continue;
                }

                if self.reason(v).is_none() || self.seen[v as usize] == Seen::Failed {
                    // The whole chain down to here is blocked with it.
                    self.analyze_stack.push((0, p));
                    for at in 0..self.analyze_stack.len() {
                        let blocked = self.analyze_stack[at].1;
                        if self.seen[blocked.var() as usize] == Seen::Undef {
                            self.seen[blocked.var() as usize] = Seen::Failed;
                            self.analyze_toclear.push(blocked);
                        }
                    }
                    return false;
                }

                // Descend into the reason of l, to resume at i afterwards.
                self.analyze_stack.push((i, p));
                p = l;
                cref = self.reason(p.var()).expect("checked above");
                i = 1;
            } else {
                if self.seen[p.var() as usize] == Seen::Undef {
                    self.seen[p.var() as usize] = Seen::Removable;
                    self.analyze_toclear.push(p);
                }
                match self.analyze_stack.pop() {
                    None => break,
                    Some((at, parent)) => {
                        i = at + 1;
                        p = parent;
                        cref = self.reason(p.var()).expect("parents have reasons");
                    }
                }
            }
        }
        true
    }

    /// Expresses a conflict on `lit` in terms of the assumptions that
    /// forced it, into `out_conflict` (which always contains `lit`).
    ///
    /// Used when an assumption turns out false: the result is the subset
    /// of assumptions implying the failure, for the caller to report.
    pub(crate) fn analyze_final(&mut self, lit: Lit, out_conflict: &mut Vec<Lit>) {
        out_conflict.clear();
        out_conflict.push(lit);

        if self.trail.level() == 0 {
            return;
        }

        self.seen[lit.var() as usize] = Seen::Source;

        for index in (self.trail.level_start(0)..self.trail.len()).rev() {
            let x = self.trail.assignments[index].var();
            if self.seen[x as usize] == Seen::Undef {
                continue;
            }
            match self.reason(x) {
                None => {
                    debug_assert!(self.level(x) > 0);
                    let implicant = !self.trail.assignments[index];
                    if implicant != lit {
                        out_conflict.push(implicant);
                    }
                }
                Some(cref) => {
                    for k in 1..self.ca.size(cref) {
                        let v = self.ca.lit(cref, k).var();
                        if self.level(v) > 0 {
                            self.seen[v as usize] = Seen::Source;
                        }
                    }
                }
            }
            self.seen[x as usize] = Seen::Undef;
        }

        self.seen[lit.var() as usize] = Seen::Undef;
    }
}
