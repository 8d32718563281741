/*!
Configuration of a solver.

All tunables are gathered in one record passed at construction; nothing is
read from process-global state. Defaults match the values the solver has
been tuned with, and are the ones exposed by the command line.
*/

/// How far conflict clause minimisation goes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CcMin {
    /// Keep the first-UIP clause as derived.
    None,
    /// Drop literals whose reason lies entirely inside the derived clause.
    Basic,
    /// Recursive self-subsuming resolution.
    Deep,
}

impl CcMin {
    pub fn from_level(level: u32) -> Self {
        match level {
            0 => CcMin::None,
            1 => CcMin::Basic,
            _ => CcMin::Deep,
        }
    }
}

/// How much polarity is remembered across backtracking.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PhaseSaving {
    None,
    /// Only assignments above the most recent decision are re-saved.
    Limited,
    Full,
}

impl PhaseSaving {
    pub fn from_level(level: u32) -> Self {
        match level {
            0 => PhaseSaving::None,
            1 => PhaseSaving::Limited,
            _ => PhaseSaving::Full,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// The variable activity decay factor.
    pub var_decay: f64,

    /// The clause activity decay factor.
    pub clause_decay: f64,

    /// The frequency with which branching tries a random variable.
    pub random_var_freq: f64,

    /// Seed for the branching generator.
    pub random_seed: f64,

    /// Conflict clause minimisation mode.
    pub ccmin_mode: CcMin,

    /// Phase saving mode.
    pub phase_saving: PhaseSaving,

    /// Choose branch polarity at random.
    pub rnd_pol: bool,

    /// Randomise initial activities.
    pub rnd_init_act: bool,

    /// Restart on the Luby schedule rather than geometrically.
    pub luby_restart: bool,

    /// The base restart interval, in conflicts.
    pub restart_first: u32,

    /// Restart interval growth factor.
    pub restart_inc: f64,

    /// The fraction of wasted arena space tolerated before collection.
    pub garbage_frac: f64,

    /// Floor for the learnt clause limit.
    pub min_learnts_lim: u32,

    /// Initial learnt limit, as a fraction of the original clause count.
    pub learntsize_factor: f64,

    /// Growth factor for the learnt limit.
    pub learntsize_inc: f64,

    /// Conflicts between learnt-limit adjustments, initially.
    pub learntsize_adjust_start: u32,

    /// Growth factor for the adjustment interval.
    pub learntsize_adjust_inc: f64,

    /// Remove satisfied original clauses during simplification.
    pub remove_satisfied: bool,

    /// 0 is silent, 1 adds the periodic search statistics block.
    pub verbosity: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            var_decay: 0.95,
            clause_decay: 0.999,
            random_var_freq: 0.0,
            random_seed: 91648253.0,
            ccmin_mode: CcMin::Deep,
            phase_saving: PhaseSaving::Full,
            rnd_pol: false,
            rnd_init_act: false,
            luby_restart: true,
            restart_first: 100,
            restart_inc: 2.0,
            garbage_frac: 0.20,
            min_learnts_lim: 0,
            learntsize_factor: 1.0 / 3.0,
            learntsize_inc: 1.1,
            learntsize_adjust_start: 100,
            learntsize_adjust_inc: 1.5,
            remove_satisfied: true,
            verbosity: 0,
        }
    }
}
