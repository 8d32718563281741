/*!
Shared helpers for the integration tests: building solvers from integer
clauses, and generating the standard benchmark families in memory.
*/

use rand::{Rng, SeedableRng};

use stoat_sat::{
    config::Config,
    generic::random::MiniRng,
    solver::Solver,
    structures::{LBool, Lit, Var},
};

/// A clause as DIMACS-style integers.
pub type IntClause = Vec<i64>;

/// Ensures variables exist for every literal of `clause` and adds it.
/// False only when the solver became unsatisfiable.
pub fn add_clause(solver: &mut Solver, clause: &[i64]) -> bool {
    let lits: Vec<Lit> = clause
        .iter()
        .map(|&name| {
            let var = (name.unsigned_abs() - 1) as Var;
            while solver.n_vars() <= var {
                solver.new_var_default();
            }
            Lit::from_dimacs(name)
        })
        .collect();
    solver.add_clause(&lits).expect("arena exhausted")
}

/// A solver over `clauses` with the default configuration.
pub fn solver_from(clauses: &[IntClause]) -> Solver {
    solver_with_config(clauses, Config::default())
}

pub fn solver_with_config(clauses: &[IntClause], config: Config) -> Solver {
    let mut solver = Solver::new(config);
    for clause in clauses {
        add_clause(&mut solver, clause);
    }
    solver
}

/// True if the solver's model satisfies every clause of `clauses`.
pub fn model_satisfies(solver: &Solver, clauses: &[IntClause]) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|&name| solver.model_value_lit(Lit::from_dimacs(name)) == LBool::True)
    })
}

/// The pigeonhole principle with `holes + 1` pigeons: unsatisfiable for
/// any number of holes.
///
/// Variable `p * holes + h + 1` places pigeon `p` in hole `h`. Every
/// pigeon gets some hole; no hole takes two pigeons.
pub fn pigeonhole(holes: i64) -> Vec<IntClause> {
    let pigeons = holes + 1;
    let var = |pigeon: i64, hole: i64| pigeon * holes + hole + 1;

    let mut clauses = Vec::new();
    for pigeon in 0..pigeons {
        clauses.push((0..holes).map(|hole| var(pigeon, hole)).collect());
    }
    for hole in 0..holes {
        for a in 0..pigeons {
            for b in a + 1..pigeons {
                clauses.push(vec![-var(a, hole), -var(b, hole)]);
            }
        }
    }
    clauses
}

/// Uniform random k-SAT over `vars` variables: each clause draws `k`
/// distinct variables and flips each sign with even odds.
pub fn uniform_random_ksat(vars: u64, clauses: usize, k: usize, seed: u64) -> Vec<IntClause> {
    let mut rng = MiniRng::from_seed(seed.to_le_bytes());
    let mut formula = Vec::with_capacity(clauses);
    while formula.len() < clauses {
        let mut clause: IntClause = Vec::with_capacity(k);
        while clause.len() < k {
            let var = rng.gen_range(1..=vars) as i64;
            if clause.iter().any(|&name| name.abs() == var) {
                continue;
            }
            clause.push(match rng.gen_bool(0.5) {
                true => var,
                false => -var,
            });
        }
        formula.push(clause);
    }
    formula
}
