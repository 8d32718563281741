use stoat_sat::{
    solver::Solver,
    structures::{LBool, Lit},
};

use stoat_tests::{add_clause, model_satisfies, solver_from};

mod verdicts {
    use super::*;

    #[test]
    fn forced_chain_unsatisfiable() {
        let mut solver = solver_from(&[vec![1, 2], vec![-1, 2], vec![-2]]);
        assert!(!solver.solve());
    }

    #[test]
    fn two_clauses_satisfiable() {
        let clauses = [vec![1, 2], vec![-1, 2]];
        let mut solver = solver_from(&clauses);
        assert!(solver.solve());
        assert!(model_satisfies(&solver, &clauses));
        assert_eq!(solver.model_value_lit(Lit::from_dimacs(2)), LBool::True);
    }

    #[test]
    fn single_unit() {
        let mut solver = solver_from(&[vec![1]]);
        assert!(solver.solve());
        assert_eq!(solver.model_value_lit(Lit::from_dimacs(1)), LBool::True);
    }

    #[test]
    fn contradictory_units() {
        let mut solver = solver_from(&[vec![1]]);
        assert!(!add_clause(&mut solver, &[-1]));
        assert!(!solver.okay());
        assert!(!solver.solve());
    }

    #[test]
    fn all_combinations_over_two_variables() {
        let mut solver = solver_from(&[vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        assert!(!solver.solve());
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn empty_clause_latches_unsatisfiable() {
        let mut solver = Solver::default();
        solver.new_var_default();
        assert!(!solver.add_clause(&[]).unwrap());
        assert!(!solver.okay());
        assert!(!solver.solve());
        // Latched: adding a satisfiable clause changes nothing.
        assert!(!add_clause(&mut solver, &[1]));
        assert!(!solver.solve());
    }

    #[test]
    fn unit_propagates_at_the_top_level() {
        let mut solver = solver_from(&[vec![1], vec![-1, 2]]);
        // Both facts are on the trail before any solve.
        assert_eq!(solver.value(Lit::from_dimacs(1)), LBool::True);
        assert_eq!(solver.value(Lit::from_dimacs(2)), LBool::True);
        assert!(solver.solve());
    }

    #[test]
    fn tautology_dropped() {
        let mut solver = solver_from(&[vec![1, -1]]);
        assert!(solver.okay());
        assert_eq!(solver.n_clauses(), 0);
        assert!(solver.solve());
    }

    #[test]
    fn duplicate_literals_collapsed() {
        let mut solver = solver_from(&[vec![1, 2, 2, 1, 3]]);
        assert_eq!(solver.n_clauses(), 1);
        assert!(solver.solve());
    }

    #[test]
    fn empty_formula_satisfiable() {
        let mut solver = Solver::default();
        assert!(solver.solve());
    }
}

mod laws {
    use super::*;

    #[test]
    fn repeat_solves_agree() {
        let clauses = [vec![1, 2, 3], vec![-1, -2], vec![-2, -3], vec![2]];
        let mut solver = solver_from(&clauses);
        assert!(solver.solve());
        let first: Vec<_> = (0..solver.n_vars()).map(|v| solver.model_value(v)).collect();
        assert!(model_satisfies(&solver, &clauses));

        assert!(solver.solve());
        let second: Vec<_> = (0..solver.n_vars()).map(|v| solver.model_value(v)).collect();
        assert!(model_satisfies(&solver, &clauses));
        assert_eq!(first, second);
    }

    #[test]
    fn added_clause_is_satisfied() {
        let clauses = [vec![1, 2], vec![-2, 3]];
        let mut solver = solver_from(&clauses);
        assert!(solver.solve());
        add_clause(&mut solver, &[-1, -3]);
        if solver.solve() {
            assert!(model_satisfies(&solver, &[vec![-1, -3]]));
        }
    }
}
