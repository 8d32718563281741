use std::io::Write;

use stoat_sat::{solver::Solver, structures::LBool};

use stoat_tests::{solver_from, uniform_random_ksat};

fn solver_from_dimacs(text: &[u8]) -> Solver {
    let mut solver = Solver::default();
    solver.read_dimacs(text).expect("readable DIMACS");
    solver
}

mod reading {
    use super::*;

    #[test]
    fn header_comments_and_clauses() {
        let mut solver = solver_from_dimacs(
            b"c a comment\np cnf 3 2\n1 -2 0\n2 3 0\n",
        );
        assert_eq!(solver.n_vars(), 3);
        assert_eq!(solver.n_clauses(), 2);
        assert!(solver.solve());
    }

    #[test]
    fn free_layout_and_percent_terminator() {
        let mut solver = solver_from_dimacs(b"p cnf 2 2\n1\n2 0 -1\n-2 0\n%\n0\n");
        assert_eq!(solver.n_clauses(), 2);
        assert!(solver.solve());
    }

    #[test]
    fn variables_created_on_demand() {
        let mut solver = solver_from_dimacs(b"1 2 0\n-1 5 0\n");
        assert_eq!(solver.n_vars(), 5);
        assert!(solver.solve());
    }

    #[test]
    fn unsatisfiable_while_reading() {
        let solver = solver_from_dimacs(b"p cnf 1 2\n1 0\n-1 0\n");
        assert!(!solver.okay());
    }

    #[test]
    fn malformed_header_rejected() {
        let mut solver = Solver::default();
        assert!(solver.read_dimacs(b"p cnf x 2\n".as_slice()).is_err());
    }

    #[test]
    fn unreadable_literal_rejected() {
        let mut solver = Solver::default();
        assert!(solver.read_dimacs(b"p cnf 2 1\n1 two 0\n".as_slice()).is_err());
    }
}

mod round_trips {
    use super::*;

    fn reparse(solver: &mut Solver) -> Solver {
        let mut out = Vec::new();
        solver.write_dimacs(&mut out, &[]).expect("writable");
        solver_from_dimacs(&out)
    }

    #[test]
    fn satisfiable_stays_satisfiable() {
        let formula = uniform_random_ksat(20, 60, 3, 91648253);
        let mut solver = solver_from(&formula);
        let mut reparsed = reparse(&mut solver);
        assert_eq!(solver.solve(), reparsed.solve());
    }

    #[test]
    fn unsatisfiable_stays_unsatisfiable() {
        let mut solver = solver_from(&[vec![1, 2], vec![-1, 2], vec![-2]]);
        let mut reparsed = reparse(&mut solver);
        assert_eq!(solver.solve(), reparsed.solve());
        assert!(!reparsed.okay() || reparsed.solve_limited(&[]) == LBool::False);
    }

    #[test]
    fn false_literals_are_omitted_and_variables_renumbered() {
        // The trailing unit falsifies -1; the long clause survives without
        // it, over variables renumbered from 1.
        let mut solver = solver_from(&[vec![-1, 2, 3], vec![1, 2, 3]]);
        stoat_tests::add_clause(&mut solver, &[1]);
        let mut out = Vec::new();
        solver.write_dimacs(&mut out, &[]).expect("writable");
        let text = String::from_utf8(out).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("p cnf 2 1"));
        assert_eq!(lines.next(), Some("1 2 0"));
    }

    #[test]
    fn gzip_input_round_trip() {
        let formula = uniform_random_ksat(10, 30, 3, 3);
        let mut solver = solver_from(&formula);
        let mut plain = Vec::new();
        solver.write_dimacs(&mut plain, &[]).expect("writable");

        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&plain).expect("compressible");
        let compressed = encoder.finish().expect("compressible");

        let mut decompressed = Solver::default();
        decompressed
            .read_dimacs(std::io::BufReader::new(flate2::read::GzDecoder::new(
                compressed.as_slice(),
            )))
            .expect("readable");
        assert_eq!(solver.solve(), decompressed.solve());
    }
}
