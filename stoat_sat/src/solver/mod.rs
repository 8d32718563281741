/*!
The solver.

[Solver] owns every database of a solve: the clause arena and the rosters
of original and learnt clauses, the watch table, the trail, and the
per-variable state (valuation, reason and level, activity, saved and
preferred polarity, branching eligibility). The algorithm itself is spread
over the [procedures](crate::procedures), each an `impl Solver` block in
its own file; this module holds construction and the minor methods they
share.

A solver is single-threaded: nothing here locks, and a solver is driven
from one thread only. What other threads may hold are the
[counters](counters::Counters), the [snapshot point](observe::SnapshotPoint)
and the [interrupt handle](InterruptHandle), all explicitly shared.
*/

pub mod counters;
pub mod observe;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    config::Config,
    db::{
        clause::{ClauseArena, ClauseRef},
        trail::Trail,
        watches::{Watcher, WatchLists},
    },
    generic::{index_heap::IndexHeap, random::MiniRng},
    misc::log::targets,
    structures::{LBool, Lit, Var},
    types::err::OutOfMemory,
};

use self::counters::Counters;
use self::observe::SnapshotPoint;

/// Reason and level of an assigned variable.
///
/// A reason of `None` marks a decision, an assumption, or a top-level fact.
#[derive(Clone, Copy, Default)]
pub(crate) struct VarData {
    pub reason: Option<ClauseRef>,
    pub level: u32,
}

/// Scratch marks used by conflict analysis.
///
/// All-`Undef` outside the analysis routines; every routine that marks
/// restores the marks it made before returning.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub(crate) enum Seen {
    #[default]
    Undef,
    /// Part of the clause under construction.
    Source,
    /// Shown redundant by self-subsuming resolution.
    Removable,
    /// Shown not redundant.
    Failed,
}

/// Sets the interrupt flag of a solver from another thread.
#[derive(Clone)]
pub struct InterruptHandle {
    flag: Arc<AtomicBool>,
}

impl InterruptHandle {
    /// Asks the solver to return from the current solve. The flag is sticky
    /// until [cleared](crate::solver::Solver::clear_interrupt).
    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

pub struct Solver {
    pub config: Config,

    // Clause storage.
    pub(crate) ca: ClauseArena,
    pub(crate) clauses: Vec<ClauseRef>,
    pub(crate) learnts: Vec<ClauseRef>,
    pub(crate) watches: WatchLists,

    // Per-variable state, in parallel arrays indexed by Var.
    pub(crate) assigns: Vec<LBool>,
    pub(crate) vardata: Vec<VarData>,
    pub(crate) polarity: Vec<bool>,
    pub(crate) user_pol: Vec<LBool>,
    pub(crate) decision: Vec<bool>,
    pub(crate) seen: Vec<Seen>,

    /// Activity store and branching order in one structure.
    pub(crate) order: IndexHeap<f64>,

    pub(crate) trail: Trail,

    // Analysis scratch, persisted to avoid reallocation.
    pub(crate) analyze_toclear: Vec<Lit>,
    pub(crate) analyze_stack: Vec<(u32, Lit)>,

    pub(crate) assumptions: Vec<Lit>,

    /// The valuation found by the most recent satisfiable solve.
    pub model: Vec<LBool>,

    /// The failing assumption subset of the most recent unsatisfiable
    /// solve under assumptions.
    pub conflict: Vec<Lit>,

    /// Cleared permanently once the formula is unsatisfiable at the top
    /// level.
    pub(crate) ok: bool,

    /// Set when the arena failed to grow; the solver no longer solves.
    pub(crate) oom: bool,

    pub(crate) var_inc: f64,
    pub(crate) cla_inc: f64,

    pub(crate) max_learnts: f64,
    pub(crate) learntsize_adjust_confl: f64,
    pub(crate) learntsize_adjust_cnt: i32,

    pub(crate) progress: f64,

    pub(crate) released_vars: Vec<Var>,
    pub(crate) free_vars: Vec<Var>,
    pub(crate) next_var: Var,

    // Simplification bookkeeping.
    pub(crate) simp_db_assigns: i64,
    pub(crate) simp_db_props: i64,

    pub(crate) rng: MiniRng,

    pub(crate) counters: Arc<Counters>,
    pub(crate) snapshot_point: Arc<SnapshotPoint>,
    pub(crate) interrupt_flag: Arc<AtomicBool>,

    pub(crate) conflict_budget: i64,
    pub(crate) propagation_budget: i64,

    pub(crate) curr_restarts: u64,

    // Local statistics, single-threaded.
    pub(crate) dec_vars: u64,
    pub(crate) clauses_literals: u64,
    pub(crate) learnts_literals: u64,
    pub(crate) max_literals: u64,
    pub(crate) tot_literals: u64,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(Config::default())
    }
}

impl Solver {
    pub fn new(config: Config) -> Self {
        let rng = MiniRng::seed(config.random_seed);
        Solver {
            config,
            ca: ClauseArena::default(),
            clauses: Vec::default(),
            learnts: Vec::default(),
            watches: WatchLists::default(),
            assigns: Vec::default(),
            vardata: Vec::default(),
            polarity: Vec::default(),
            user_pol: Vec::default(),
            decision: Vec::default(),
            seen: Vec::default(),
            order: IndexHeap::default(),
            trail: Trail::default(),
            analyze_toclear: Vec::default(),
            analyze_stack: Vec::default(),
            assumptions: Vec::default(),
            model: Vec::default(),
            conflict: Vec::default(),
            ok: true,
            oom: false,
            var_inc: 1.0,
            cla_inc: 1.0,
            max_learnts: 0.0,
            learntsize_adjust_confl: 0.0,
            learntsize_adjust_cnt: 0,
            progress: 0.0,
            released_vars: Vec::default(),
            free_vars: Vec::default(),
            next_var: 0,
            simp_db_assigns: -1,
            simp_db_props: 0,
            rng,
            counters: Arc::default(),
            snapshot_point: Arc::default(),
            interrupt_flag: Arc::default(),
            conflict_budget: -1,
            propagation_budget: -1,
            curr_restarts: 0,
            dec_vars: 0,
            clauses_literals: 0,
            learnts_literals: 0,
            max_literals: 0,
            tot_literals: 0,
        }
    }

    // Variables

    /// Creates a fresh variable, recycling a released index when one is
    /// available.
    ///
    /// `user_pol` suggests a branching polarity; `dvar` makes the variable
    /// eligible for branching. Note a satisfiable verdict only speaks to
    /// decision variables.
    pub fn new_var(&mut self, user_pol: LBool, dvar: bool) -> Var {
        let v = match self.free_vars.pop() {
            Some(v) => v,
            None => {
                let v = self.next_var;
                self.next_var += 1;
                self.watches.init_var();
                self.assigns.push(LBool::Undef);
                self.vardata.push(VarData::default());
                self.polarity.push(false);
                self.user_pol.push(LBool::Undef);
                self.decision.push(false);
                self.seen.push(Seen::Undef);
                self.order.reserve(v as usize);
                v
            }
        };
        self.assigns[v as usize] = LBool::Undef;
        self.vardata[v as usize] = VarData::default();
        self.polarity[v as usize] = false;
        self.user_pol[v as usize] = user_pol;
        self.seen[v as usize] = Seen::Undef;
        self.order.set_value(
            v as usize,
            match self.config.rnd_init_act {
                true => self.rng.next_f64() * 0.00001,
                false => 0.0,
            },
        );
        self.decision[v as usize] = false;
        self.set_decision_var(v, dvar);
        v
    }

    /// A fresh decision variable with no polarity suggestion.
    pub fn new_var_default(&mut self) -> Var {
        self.new_var(LBool::Undef, true)
    }

    pub fn set_decision_var(&mut self, v: Var, dvar: bool) {
        if dvar && !self.decision[v as usize] {
            self.dec_vars += 1;
        } else if !dvar && self.decision[v as usize] {
            self.dec_vars -= 1;
        }
        self.decision[v as usize] = dvar;
        self.insert_var_order(v);
    }

    /// Releases the variable of `lit` with a promise it will not be used
    /// in further clauses.
    ///
    /// The literal becomes a permanent top-level fact --- the variable is
    /// not freed of its value, only excluded from future branching --- and
    /// the index is recycled through the free list at the next top-level
    /// simplification.
    pub fn release_var(&mut self, lit: Lit) -> Result<(), OutOfMemory> {
        if self.value(lit) == LBool::Undef {
            self.add_clause(&[lit])?;
            self.released_vars.push(lit.var());
        }
        Ok(())
    }

    pub fn n_vars(&self) -> u32 {
        self.next_var
    }

    pub fn n_assigns(&self) -> usize {
        self.trail.len()
    }

    pub fn n_clauses(&self) -> usize {
        Counters::get(&self.counters.num_clauses) as usize
    }

    pub fn n_learnts(&self) -> usize {
        Counters::get(&self.counters.num_learnts) as usize
    }

    pub fn n_free_vars(&self) -> u64 {
        let fixed = match self.trail.level() {
            0 => self.trail.len(),
            _ => self.trail.level_start(0),
        };
        // Top-level assignments may include non-decision variables.
        self.dec_vars.saturating_sub(fixed as u64)
    }

    // Valuation

    pub fn value_var(&self, v: Var) -> LBool {
        self.assigns[v as usize]
    }

    pub fn value(&self, lit: Lit) -> LBool {
        match lit.polarity() {
            true => self.assigns[lit.var() as usize],
            false => !self.assigns[lit.var() as usize],
        }
    }

    pub(crate) fn level(&self, v: Var) -> u32 {
        self.vardata[v as usize].level
    }

    pub(crate) fn reason(&self, v: Var) -> Option<ClauseRef> {
        self.vardata[v as usize].reason
    }

    /// True if the clause is the reason of its first literal's assignment.
    pub(crate) fn locked(&self, cref: ClauseRef) -> bool {
        let first = self.ca.lit(cref, 0);
        self.value(first) == LBool::True && self.reason(first.var()) == Some(cref)
    }

    /// Records an assignment without checking for consistency.
    /// The caller guarantees `lit` is currently unassigned.
    pub(crate) fn unchecked_enqueue(&mut self, lit: Lit, from: Option<ClauseRef>) {
        debug_assert!(self.value(lit) == LBool::Undef);
        self.assigns[lit.var() as usize] = LBool::from_bool(lit.polarity());
        self.vardata[lit.var() as usize] = VarData {
            reason: from,
            level: self.trail.level(),
        };
        self.trail.assignments.push(lit);
    }

    // Clauses

    /// Adds a clause at the top level.
    ///
    /// Duplicate literals are collapsed, tautologies and already satisfied
    /// clauses silently dropped, and a resulting unit propagated at once.
    /// `Ok(false)` means the formula is now unsatisfiable, permanently.
    ///
    /// # Panics
    /// When called with decisions on the trail; clauses enter at level
    /// zero only.
    pub fn add_clause(&mut self, lits: &[Lit]) -> Result<bool, OutOfMemory> {
        assert_eq!(
            self.trail.level(),
            0,
            "clauses may only be added at decision level zero"
        );
        if !self.ok {
            return Ok(false);
        }

        let mut ps = lits.to_vec();
        ps.sort_unstable();
        let mut kept: Option<Lit> = None;
        let mut filtered = Vec::with_capacity(ps.len());
        for &p in ps.iter() {
            // Sorting placed complementary literals next to each other.
            if self.value(p) == LBool::True || Some(!p) == kept {
                return Ok(true);
            }
            if self.value(p) != LBool::False && Some(p) != kept {
                filtered.push(p);
                kept = Some(p);
            }
        }

        match filtered.len() {
            0 => {
                self.ok = false;
                Ok(false)
            }
            1 => {
                self.unchecked_enqueue(filtered[0], None);
                self.ok = self.propagate().is_none();
                Ok(self.ok)
            }
            _ => {
                let cref = self.ca.alloc(&filtered, false)?;
                self.clauses.push(cref);
                self.attach_clause(cref);
                Ok(true)
            }
        }
    }

    pub(crate) fn attach_clause(&mut self, cref: ClauseRef) {
        let size = self.ca.size(cref);
        debug_assert!(size > 1);
        let c0 = self.ca.lit(cref, 0);
        let c1 = self.ca.lit(cref, 1);
        self.watches.occs_mut(!c0).push(Watcher::new(cref, c1));
        self.watches.occs_mut(!c1).push(Watcher::new(cref, c0));
        if self.ca.is_learnt(cref) {
            Counters::add(&self.counters.num_learnts, 1);
            self.learnts_literals += size as u64;
        } else {
            Counters::add(&self.counters.num_clauses, 1);
            self.clauses_literals += size as u64;
        }
    }

    pub(crate) fn detach_clause(&mut self, cref: ClauseRef) {
        let size = self.ca.size(cref);
        debug_assert!(size > 1);
        let c0 = self.ca.lit(cref, 0);
        let c1 = self.ca.lit(cref, 1);
        // Lazily: the buckets are smudged and filtered on next access.
        self.watches.smudge(!c0);
        self.watches.smudge(!c1);
        if self.ca.is_learnt(cref) {
            Counters::sub(&self.counters.num_learnts, 1);
            self.learnts_literals -= size as u64;
        } else {
            Counters::sub(&self.counters.num_clauses, 1);
            self.clauses_literals -= size as u64;
        }
    }

    pub(crate) fn remove_clause(&mut self, cref: ClauseRef) {
        log::trace!(target: targets::CLAUSE_DB, "Removing clause {cref:?}");
        self.detach_clause(cref);
        if self.locked(cref) {
            let v = self.ca.lit(cref, 0).var();
            self.vardata[v as usize].reason = None;
        }
        self.ca.mark_removed(cref);
        self.ca.free(cref);
    }

    pub(crate) fn satisfied(&self, cref: ClauseRef) -> bool {
        self.ca
            .lits(cref)
            .iter()
            .any(|&lit| self.value(lit) == LBool::True)
    }

    // Activity

    pub(crate) fn insert_var_order(&mut self, v: Var) {
        if self.value_var(v) == LBool::Undef && self.decision[v as usize] {
            self.order.activate(v as usize);
        }
    }

    pub(crate) fn var_bump_activity(&mut self, v: Var) {
        let inc = self.var_inc;
        self.order.update(v as usize, |a| a + inc);
        if self.order.value(v as usize) > 1e100 {
            // Rescale before the increment can overflow.
            self.order.apply_to_all(|a| a * 1e-100);
            self.var_inc *= 1e-100;
        }
    }

    pub(crate) fn var_decay_activity(&mut self) {
        self.var_inc *= 1.0 / self.config.var_decay;
    }

    pub(crate) fn cla_bump_activity(&mut self, cref: ClauseRef) {
        let bumped = self.ca.activity(cref) + self.cla_inc;
        self.ca.set_activity(cref, bumped);
        if bumped > 1e20 {
            for &learnt in self.learnts.iter() {
                let scaled = self.ca.activity(learnt) * 1e-20;
                self.ca.set_activity(learnt, scaled);
            }
            self.cla_inc *= 1e-20;
        }
    }

    pub(crate) fn cla_decay_activity(&mut self) {
        self.cla_inc *= 1.0 / self.config.clause_decay;
    }

    // Budgets and interrupts

    /// Limits the next solve to roughly `n` further conflicts.
    pub fn set_conf_budget(&mut self, n: i64) {
        self.conflict_budget = Counters::get(&self.counters.conflicts) as i64 + n;
    }

    /// Limits the next solve to roughly `n` further propagations.
    pub fn set_prop_budget(&mut self, n: i64) {
        self.propagation_budget = Counters::get(&self.counters.propagations) as i64 + n;
    }

    pub fn budget_off(&mut self) {
        self.conflict_budget = -1;
        self.propagation_budget = -1;
    }

    pub(crate) fn within_budget(&self) -> bool {
        !self.oom
            && !self.interrupt_flag.load(Ordering::Relaxed)
            && (self.conflict_budget < 0
                || Counters::get(&self.counters.conflicts) < self.conflict_budget as u64)
            && (self.propagation_budget < 0
                || Counters::get(&self.counters.propagations) < self.propagation_budget as u64)
    }

    /// Asks the running solve to return. Sticky until cleared.
    pub fn interrupt(&self) {
        self.interrupt_flag.store(true, Ordering::Relaxed);
    }

    pub fn clear_interrupt(&self) {
        self.interrupt_flag.store(false, Ordering::Relaxed);
    }

    /// A handle for interrupting from another thread.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            flag: self.interrupt_flag.clone(),
        }
    }

    // Shared observation surface

    pub fn counters(&self) -> Arc<Counters> {
        self.counters.clone()
    }

    pub fn snapshot_point(&self) -> Arc<SnapshotPoint> {
        self.snapshot_point.clone()
    }

    // State queries

    /// False once the formula has been proven unsatisfiable at the top
    /// level; every further solve returns unsatisfiable immediately.
    pub fn okay(&self) -> bool {
        self.ok
    }

    /// True when an arena allocation has failed; verdicts are no longer
    /// reachable and solves return undefined.
    pub fn out_of_memory(&self) -> bool {
        self.oom
    }

    /// The model value of `v` after a satisfiable solve.
    pub fn model_value(&self, v: Var) -> LBool {
        self.model.get(v as usize).copied().unwrap_or(LBool::Undef)
    }

    /// The model value of `lit` after a satisfiable solve.
    pub fn model_value_lit(&self, lit: Lit) -> LBool {
        match lit.polarity() {
            true => self.model_value(lit.var()),
            false => !self.model_value(lit.var()),
        }
    }

    /// An estimate of the searched fraction of the space, kept across
    /// interrupted solves.
    pub fn progress_estimate(&self) -> f64 {
        self.progress
    }

    /// Prints the accumulated statistics block.
    pub fn print_stats(&self, cpu_time: std::time::Duration) {
        let secs = cpu_time.as_secs_f64().max(f64::MIN_POSITIVE);
        let conflicts = Counters::get(&self.counters.conflicts);
        let decisions = Counters::get(&self.counters.decisions);
        let propagations = Counters::get(&self.counters.propagations);
        println!(
            "restarts              : {}",
            Counters::get(&self.counters.restarts)
        );
        println!(
            "conflicts             : {:<12}   ({:.0} /sec)",
            conflicts,
            conflicts as f64 / secs
        );
        println!(
            "decisions             : {:<12}   ({:4.2} % random) ({:.0} /sec)",
            decisions,
            Counters::get(&self.counters.rnd_decisions) as f64 * 100.0
                / (decisions as f64).max(1.0),
            decisions as f64 / secs
        );
        println!(
            "propagations          : {:<12}   ({:.0} /sec)",
            propagations,
            propagations as f64 / secs
        );
        println!(
            "conflict literals     : {:<12}   ({:4.2} % deleted)",
            self.tot_literals,
            (self.max_literals - self.tot_literals) as f64 * 100.0
                / (self.max_literals as f64).max(1.0)
        );
        println!("CPU time              : {secs} s");
    }
}
