/*!
The search loop.

`search` interleaves propagation with branching until a conflict budget
runs out, following each conflict with analysis, a backjump, and the
attachment of the learnt clause. The outer loop in `solve_internal` hands
out budgets along the restart schedule and turns the final status into a
model or a failing assumption set.

The top of the loop is the engine's only cooperative point: the snapshot
hand-off is served there, and the budget check observes the interrupt
flag, so a solve returns within a bounded number of conflicts of either.
*/

use crate::{
    generic::luby::luby,
    misc::log::targets,
    solver::{counters::Counters, Solver},
    structures::{LBool, Lit},
};

impl Solver {
    /// Searches for a model or a conflict at the root, for up to
    /// `nof_conflicts` conflicts (negative: unbounded).
    ///
    /// True: a model is found over the decision variables. False: the
    /// formula, or the formula under the assumptions, is unsatisfiable.
    /// Undefined: the budget ran out and the trail was reset.
    pub(crate) fn search(&mut self, nof_conflicts: i64) -> LBool {
        debug_assert!(self.ok);
        let mut conflict_c: i64 = 0;
        let mut learnt_clause: Vec<Lit> = Vec::new();

        loop {
            // Propagation is complete and state is stable here; serve any
            // waiting observer before mutating further.
            if self.snapshot_point.requested() {
                let snapshot = self.take_snapshot();
                self.snapshot_point.publish(snapshot);
            }

            match self.propagate() {
                Some(confl) => {
                    Counters::add(&self.counters.conflicts, 1);
                    conflict_c += 1;

                    if self.trail.level() == 0 {
                        // A conflict with nothing to undo: unsatisfiable.
                        return LBool::False;
                    }

                    let backtrack_level = self.analyze(confl, &mut learnt_clause);
                    self.cancel_until(backtrack_level);

                    if learnt_clause.len() == 1 {
                        self.unchecked_enqueue(learnt_clause[0], None);
                    } else {
                        match self.ca.alloc(&learnt_clause, true) {
                            Err(_) => {
                                self.oom = true;
                                self.cancel_until(0);
                                return LBool::Undef;
                            }
                            Ok(cref) => {
                                self.learnts.push(cref);
                                self.attach_clause(cref);
                                self.cla_bump_activity(cref);
                                self.unchecked_enqueue(learnt_clause[0], Some(cref));
                            }
                        }
                    }

                    self.var_decay_activity();
                    self.cla_decay_activity();

                    self.learntsize_adjust_cnt -= 1;
                    if self.learntsize_adjust_cnt == 0 {
                        self.learntsize_adjust_confl *= self.config.learntsize_adjust_inc;
                        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i32;
                        self.max_learnts *= self.config.learntsize_inc;

                        if self.config.verbosity >= 1 {
                            let learnts = self.n_learnts() as u64;
                            println!(
                                "| {:9} | {:7} {:8} {:8} | {:8} {:8} {:6.0} | {:6.3} % |",
                                Counters::get(&self.counters.conflicts),
                                self.n_free_vars(),
                                self.n_clauses(),
                                self.clauses_literals,
                                self.max_learnts as u64,
                                learnts,
                                self.learnts_literals as f64 / learnts.max(1) as f64,
                                self.estimate_progress() * 100.0,
                            );
                        }
                    }
                }

                None => {
                    if (nof_conflicts >= 0 && conflict_c >= nof_conflicts) || !self.within_budget()
                    {
                        // Give up this round, preserving how far we got.
                        self.progress = self.estimate_progress();
                        self.cancel_until(0);
                        return LBool::Undef;
                    }

                    if self.trail.level() == 0 && !self.simplify() {
                        return LBool::False;
                    }

                    if self.learnts.len() as f64 - self.n_assigns() as f64 >= self.max_learnts {
                        self.reduce_db();
                    }

                    let mut next: Option<Lit> = None;
                    while (self.trail.level() as usize) < self.assumptions.len() {
                        // Perform user provided assumption:
                        let p = self.assumptions[self.trail.level() as usize];
                        match self.value(p) {
                            LBool::True => {
                                // Dummy level to keep one assumption per level.
                                self.trail.new_level();
                            }
                            LBool::False => {
                                let mut out = std::mem::take(&mut self.conflict);
                                self.analyze_final(!p, &mut out);
                                self.conflict = out;
                                return LBool::False;
                            }
                            LBool::Undef => {
                                next = Some(p);
                                break;
                            }
                        }
                    }

                    let next = match next {
                        Some(p) => p,
                        None => {
                            Counters::add(&self.counters.decisions, 1);
                            match self.pick_branch_lit() {
                                // No unassigned decision variable remains.
                                None => return LBool::True,
                                Some(p) => p,
                            }
                        }
                    };

                    log::trace!(target: targets::SEARCH, "Decide {next} at level {}", self.trail.level() + 1);
                    self.trail.new_level();
                    self.unchecked_enqueue(next, None);
                }
            }
        }
    }

    /// The next branching literal, or nothing when every decision variable
    /// is assigned.
    pub(crate) fn pick_branch_lit(&mut self) -> Option<Lit> {
        let mut next = None;

        // Occasional random pick, to escape heavy-tailed orderings.
        if self.rng.next_f64() < self.config.random_var_freq && !self.order.is_active_empty() {
            let slot = self.rng.below(self.order.active_len() as u32) as usize;
            let v = self.order.at(slot) as u32;
            if self.value_var(v) == LBool::Undef && self.decision[v as usize] {
                Counters::add(&self.counters.rnd_decisions, 1);
            }
            next = Some(v);
        }

        // Activity order, skipping assigned entries.
        let v = loop {
            match next {
                Some(v) if self.value_var(v) == LBool::Undef && self.decision[v as usize] => {
                    break v;
                }
                _ => match self.order.pop_max() {
                    None => return None,
                    Some(v) => next = Some(v as u32),
                },
            }
        };

        let polarity = match self.user_pol[v as usize] {
            LBool::True => true,
            LBool::False => false,
            LBool::Undef => match self.config.rnd_pol {
                true => self.rng.next_f64() < 0.5,
                false => self.polarity[v as usize],
            },
        };
        Some(Lit::new(v, polarity))
    }

    /// The searched share of the space, weighting level `k` assignments by
    /// `1 / n_vars^k`.
    pub(crate) fn estimate_progress(&self) -> f64 {
        let n = self.n_vars() as f64;
        if n == 0.0 {
            return 0.0;
        }
        let f = 1.0 / n;
        let mut progress = 0.0;
        for level in 0..=self.trail.level() {
            let begin = match level {
                0 => 0,
                _ => self.trail.level_start(level - 1),
            };
            let end = match level == self.trail.level() {
                true => self.trail.len(),
                false => self.trail.level_start(level),
            };
            progress += f.powi(level as i32) * (end - begin) as f64;
        }
        progress / n
    }

    /// Solves under the assumptions recorded in `self.assumptions`.
    fn solve_internal(&mut self) -> LBool {
        self.model.clear();
        self.conflict.clear();
        if !self.ok {
            return LBool::False;
        }
        if self.oom {
            return LBool::Undef;
        }

        self.max_learnts =
            (self.n_clauses() as f64 * self.config.learntsize_factor).max(self.config.min_learnts_lim as f64);
        self.learntsize_adjust_confl = self.config.learntsize_adjust_start as f64;
        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i32;

        if self.config.verbosity >= 1 {
            println!("============================[ Search Statistics ]==============================");
            println!("| Conflicts |          ORIGINAL         |          LEARNT          | Progress |");
            println!("|           |    Vars  Clauses Literals |    Limit  Clauses Lit/Cl |          |");
            println!("===============================================================================");
        }

        let mut status = LBool::Undef;
        while status == LBool::Undef {
            let rest_base = match self.config.luby_restart {
                true => luby(self.config.restart_inc, self.curr_restarts),
                false => self.config.restart_inc.powi(self.curr_restarts as i32),
            };
            status = self.search((rest_base * self.config.restart_first as f64) as i64);
            if !self.within_budget() {
                break;
            }
            self.curr_restarts += 1;
            self.counters
                .restarts
                .store(self.curr_restarts, std::sync::atomic::Ordering::Relaxed);
        }

        if self.config.verbosity >= 1 {
            println!("===============================================================================");
        }

        match status {
            LBool::True => {
                self.model = self.assigns.clone();
                self.counters
                    .solved
                    .store(true, std::sync::atomic::Ordering::Relaxed);
            }
            LBool::False => {
                if self.conflict.is_empty() {
                    self.ok = false;
                }
                self.counters
                    .solved
                    .store(true, std::sync::atomic::Ordering::Relaxed);
            }
            LBool::Undef => {}
        }

        self.cancel_until(0);
        status
    }

    /// Determines satisfiability under `assumptions`, honouring budgets
    /// and the interrupt flag.
    ///
    /// After `True` the [model](Solver::model) holds a satisfying total
    /// assignment; after `False` with assumptions,
    /// [conflict](Solver::conflict) holds a failing assumption subset.
    pub fn solve_limited(&mut self, assumptions: &[Lit]) -> LBool {
        self.assumptions = assumptions.to_vec();
        self.solve_internal()
    }

    /// Determines satisfiability with no budget; true on satisfiable.
    pub fn solve(&mut self) -> bool {
        self.budget_off();
        self.solve_limited(&[]) == LBool::True
    }

    /// Propagates `assumps` at an ephemeral level and collects the implied
    /// literals. False when the assumptions are inconsistent.
    pub fn implies(&mut self, assumps: &[Lit], out: &mut Vec<Lit>) -> bool {
        debug_assert_eq!(self.trail.level(), 0);
        self.trail.new_level();
        for &a in assumps {
            match self.value(a) {
                LBool::False => {
                    self.cancel_until(0);
                    return false;
                }
                LBool::True => {}
                LBool::Undef => self.unchecked_enqueue(a, None),
            }
        }

        let before = self.trail.len();
        let consistent = self.propagate().is_none();
        if consistent {
            out.clear();
            out.extend_from_slice(&self.trail.assignments[before..]);
        }
        self.cancel_until(0);
        consistent
    }
}
