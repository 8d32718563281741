use stoat_sat::structures::{LBool, Lit};

use stoat_tests::solver_from;

#[test]
fn assumption_fixes_a_branch() {
    let mut solver = solver_from(&[vec![1, 2]]);
    let not_one = Lit::from_dimacs(-1);
    assert_eq!(solver.solve_limited(&[not_one]), LBool::True);
    assert_eq!(solver.model_value_lit(not_one), LBool::True);
    assert_eq!(solver.model_value_lit(Lit::from_dimacs(2)), LBool::True);
}

#[test]
fn assumption_against_a_unit_fails_with_its_negation() {
    let mut solver = solver_from(&[vec![1]]);
    let not_one = Lit::from_dimacs(-1);
    assert_eq!(solver.solve_limited(&[not_one]), LBool::False);
    assert_eq!(solver.conflict, vec![Lit::from_dimacs(1)]);
    // The formula itself stays satisfiable.
    assert!(solver.okay());
    assert_eq!(solver.solve_limited(&[]), LBool::True);
}

#[test]
fn failing_subset_is_reported() {
    // 1 ∧ 2 forces 3; assuming -3 with both must fail, and the conflict
    // names only assumptions.
    let mut solver = solver_from(&[vec![-1, -2, 3]]);
    let assumptions = [
        Lit::from_dimacs(1),
        Lit::from_dimacs(2),
        Lit::from_dimacs(-3),
    ];
    assert_eq!(solver.solve_limited(&assumptions), LBool::False);
    assert!(!solver.conflict.is_empty());
    for lit in solver.conflict.iter() {
        assert!(assumptions.contains(&!*lit) || assumptions.contains(lit));
    }
}

#[test]
fn consistent_assumptions_leave_no_conflict() {
    let mut solver = solver_from(&[vec![1, 2], vec![-1, 2]]);
    let report = solver.solve_limited(&[Lit::from_dimacs(1)]);
    assert_eq!(report, LBool::True);
    assert!(solver.conflict.is_empty());
}

#[test]
fn implies_collects_propagations() {
    let mut solver = solver_from(&[vec![-1, 2], vec![-2, 3]]);
    let mut implied = Vec::new();
    assert!(solver.implies(&[Lit::from_dimacs(1)], &mut implied));
    assert!(implied.contains(&Lit::from_dimacs(2)));
    assert!(implied.contains(&Lit::from_dimacs(3)));
    // The probe leaves no trace.
    assert_eq!(solver.value(Lit::from_dimacs(1)), LBool::Undef);
}

#[test]
fn implies_detects_inconsistency() {
    let mut solver = solver_from(&[vec![-1, 2], vec![-1, -2]]);
    let mut implied = Vec::new();
    assert!(!solver.implies(&[Lit::from_dimacs(1)], &mut implied));
}
