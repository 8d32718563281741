use stoat_sat::config::Config;

use stoat_tests::{model_satisfies, solver_from, solver_with_config, uniform_random_ksat};

mod three_sat {
    use super::*;

    /// Ratio 3.0 sits below the satisfiability threshold, so these
    /// instances are expected satisfiable, and any claimed model is
    /// checked against the formula.
    #[test]
    fn ratio_three_over_twenty_vars() {
        let formula = uniform_random_ksat(20, 60, 3, 91648253);
        let mut solver = solver_from(&formula);
        assert!(solver.solve());
        assert!(model_satisfies(&solver, &formula));
    }

    /// The same seed yields the same formula, and the solver the same
    /// verdict and model, run to run.
    #[test]
    fn seeded_runs_reproduce() {
        let formula = uniform_random_ksat(20, 60, 3, 91648253);
        assert_eq!(formula, uniform_random_ksat(20, 60, 3, 91648253));

        let mut first = solver_from(&formula);
        let mut second = solver_from(&formula);
        assert_eq!(first.solve(), second.solve());
        for v in 0..first.n_vars() {
            assert_eq!(first.model_value(v), second.model_value(v));
        }
    }

    #[test]
    fn fifty_vars_at_low_ratio() {
        let formula = uniform_random_ksat(50, 150, 3, 7);
        let mut solver = solver_from(&formula);
        assert!(solver.solve());
        assert!(model_satisfies(&solver, &formula));
    }

    /// A batch of seeds around the threshold, checking only that every
    /// claimed model is genuine.
    #[test]
    fn models_hold_across_seeds() {
        for seed in 1..=20 {
            let formula = uniform_random_ksat(30, 120, 3, seed);
            let mut solver = solver_from(&formula);
            if solver.solve() {
                assert!(model_satisfies(&solver, &formula), "bad model, seed {seed}");
            }
        }
    }

    /// High-ratio instances are almost surely unsatisfiable; either way
    /// the verdicts of two differently configured solvers must agree.
    #[test]
    fn configurations_agree_on_verdicts() {
        for seed in 1..=10 {
            let formula = uniform_random_ksat(25, 250, 3, seed);
            let mut plain = solver_from(&formula);

            let geometric = Config {
                luby_restart: false,
                restart_first: 10,
                ..Config::default()
            };
            let mut tuned = solver_with_config(&formula, geometric);

            assert_eq!(plain.solve(), tuned.solve(), "verdict split, seed {seed}");
        }
    }
}
