use stoat_tests::{pigeonhole, solver_from};

mod phole {
    use super::*;

    #[test]
    fn three_pigeons_two_holes() {
        // Nine clauses over six variables.
        let formula = pigeonhole(2);
        assert_eq!(formula.len(), 9);
        let mut solver = solver_from(&formula);
        assert!(!solver.solve());
    }

    #[test]
    fn four_pigeons_three_holes() {
        let mut solver = solver_from(&pigeonhole(3));
        assert!(!solver.solve());
    }

    #[test]
    fn six_pigeons_five_holes() {
        let mut solver = solver_from(&pigeonhole(5));
        assert!(!solver.solve());
    }

    #[test]
    #[ignore = "expensive"]
    fn nine_pigeons_eight_holes() {
        let mut solver = solver_from(&pigeonhole(8));
        assert!(!solver.solve());
    }
}
