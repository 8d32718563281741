use std::time::Duration;

use stoat_sat::{
    config::Config,
    solver::{counters::Counters, Solver},
    structures::{LBool, Lit},
};

use stoat_tests::{model_satisfies, pigeonhole, solver_from, solver_with_config, uniform_random_ksat};

mod budgets_and_interrupts {
    use super::*;

    #[test]
    fn conflict_budget_returns_undefined() {
        let mut solver = solver_from(&pigeonhole(7));
        solver.set_conf_budget(1);
        assert_eq!(solver.solve_limited(&[]), LBool::Undef);
        // Progress survives the interrupted solve, and lifting the budget
        // completes it.
        solver.budget_off();
        assert_eq!(solver.solve_limited(&[]), LBool::False);
    }

    #[test]
    fn propagation_budget_returns_undefined() {
        let mut solver = solver_from(&pigeonhole(7));
        solver.set_prop_budget(1);
        assert_eq!(solver.solve_limited(&[]), LBool::Undef);
    }

    #[test]
    fn sticky_interrupt() {
        let mut solver = solver_from(&pigeonhole(5));
        solver.interrupt();
        assert_eq!(solver.solve_limited(&[]), LBool::Undef);
        // Still set: the next solve returns at its first budget check too.
        assert_eq!(solver.solve_limited(&[]), LBool::Undef);
        solver.clear_interrupt();
        assert_eq!(solver.solve_limited(&[]), LBool::False);
    }

    #[test]
    fn interrupt_from_another_thread() {
        let mut solver = solver_from(&pigeonhole(9));
        let handle = solver.interrupt_handle();
        let interrupter = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            handle.interrupt();
        });
        // Either the interrupt lands mid-solve (undefined) or the instance
        // resolves first (unsatisfiable); both are in contract.
        let report = solver.solve_limited(&[]);
        interrupter.join().expect("interrupter panicked");
        assert_ne!(report, LBool::True);
    }
}

mod shared_state {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut solver = solver_from(&pigeonhole(4));
        let counters = solver.counters();
        assert!(!solver.solve());
        assert!(Counters::get(&counters.conflicts) > 0);
        assert!(Counters::get(&counters.propagations) > 0);
        assert!(Counters::get(&counters.decisions) > 0);
        assert!(counters.solved.load(std::sync::atomic::Ordering::Relaxed));
    }

    #[test]
    fn snapshot_served_during_solve() {
        let mut solver = solver_from(&pigeonhole(8));
        let snapshots = solver.snapshot_point();

        let observer = std::thread::spawn(move || {
            snapshots.request();
            snapshots.wait(Duration::from_secs(10))
        });

        assert!(!solver.solve());
        let snapshot = observer.join().expect("observer panicked");
        if let Some(snapshot) = snapshot {
            assert!(snapshot.live_clauses <= 9 * 8 * 9 / 2 + 9);
            if snapshot.live_vars > 0 {
                assert!(snapshot.clause_variable_ratio > 0.0);
            }
        }
    }
}

mod maintenance {
    use super::*;

    /// A small garbage fraction forces collection mid-search; verdict and
    /// model must be unaffected.
    #[test]
    fn collection_preserves_answers() {
        let eager = Config {
            garbage_frac: 0.001,
            learntsize_factor: 0.05,
            ..Config::default()
        };
        // Conflict-heavy, so reduction and collection both fire.
        let mut collected = solver_with_config(&pigeonhole(5), eager);
        assert!(!collected.solve());
        let counters = collected.counters();
        assert!(Counters::get(&counters.gc_events) > 0);
    }

    #[test]
    fn collection_preserves_models() {
        let formula = uniform_random_ksat(40, 160, 3, 11);
        let eager_gc = Config {
            garbage_frac: 0.001,
            learntsize_factor: 0.05,
            ..Config::default()
        };
        let mut collected = solver_with_config(&formula, eager_gc);
        let mut plain = solver_from(&formula);
        assert_eq!(collected.solve(), plain.solve());
        if collected.okay() {
            assert!(model_satisfies(&collected, &formula));
        }
    }

    /// A learnt limit floor of zero with a tiny factor forces reduction
    /// early and often.
    #[test]
    fn reduction_preserves_answers() {
        let formula = uniform_random_ksat(40, 160, 3, 13);
        let eager_reduce = Config {
            learntsize_factor: 0.01,
            ..Config::default()
        };
        let mut reduced = solver_with_config(&formula, eager_reduce);
        let mut plain = solver_from(&formula);
        assert_eq!(reduced.solve(), plain.solve());
    }

    #[test]
    fn simplify_alone_is_sound() {
        let mut solver = solver_from(&[vec![1], vec![-1, 2], vec![2, 3]]);
        assert!(solver.simplify());
        // Clauses satisfied at the top level are gone.
        assert_eq!(solver.n_clauses(), 0);
        assert!(solver.solve());
    }

    #[test]
    fn released_variable_becomes_a_fact() {
        let mut solver = Solver::default();
        let v = solver.new_var_default();
        let w = solver.new_var_default();
        solver
            .add_clause(&[Lit::new(v, false), Lit::new(w, true)])
            .unwrap();

        solver.release_var(Lit::new(v, true)).unwrap();
        assert_eq!(solver.value(Lit::new(v, true)), LBool::True);
        assert!(solver.simplify());

        // The index is recycled for the next variable.
        let fresh = solver.new_var_default();
        assert_eq!(fresh, v);
        assert!(solver.solve());
    }
}

mod configurations {
    use super::*;

    #[test]
    fn minimisation_modes_agree() {
        let formula = pigeonhole(5);
        for level in 0..=2 {
            let config = Config {
                ccmin_mode: stoat_sat::config::CcMin::from_level(level),
                ..Config::default()
            };
            let mut solver = solver_with_config(&formula, config);
            assert!(!solver.solve(), "verdict changed at ccmin {level}");
        }
    }

    #[test]
    fn phase_saving_modes_agree() {
        let formula = uniform_random_ksat(30, 90, 3, 5);
        let mut verdicts = Vec::new();
        for level in 0..=2 {
            let config = Config {
                phase_saving: stoat_sat::config::PhaseSaving::from_level(level),
                ..Config::default()
            };
            let mut solver = solver_with_config(&formula, config);
            verdicts.push(solver.solve());
        }
        assert!(verdicts.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn random_branching_still_sound() {
        let formula = pigeonhole(4);
        let config = Config {
            random_var_freq: 0.5,
            rnd_init_act: true,
            ..Config::default()
        };
        let mut solver = solver_with_config(&formula, config);
        assert!(!solver.solve());
    }

    #[test]
    fn user_polarity_is_respected_when_free() {
        let mut solver = Solver::default();
        let v = solver.new_var(LBool::False, true);
        let w = solver.new_var_default();
        solver
            .add_clause(&[Lit::new(v, true), Lit::new(w, true)])
            .unwrap();
        assert!(solver.solve());
        // Branching preferred v = false, so the clause held through w.
        assert_eq!(solver.model_value(v), LBool::False);
        assert_eq!(solver.model_value(w), LBool::True);
    }
}
