/*!
A conflict-driven clause-learning SAT solver in the MiniSat lineage.

Given a propositional formula in conjunctive normal form, a [Solver]
decides satisfiability and, when satisfiable, produces a total assignment
over its decision variables satisfying every clause.

# Orientation

A solve is a conversation between a handful of databases and the
procedures that revise them:

- Clauses live in a [region-based arena](db::clause) addressed by compact
  references, with [watch lists](db::watches) indexing them by the
  literals whose falsification matters.
- The valuation is a [trail](db::trail) of literals in assignment order,
  cut into decision levels.
- Branching is driven by variable activities kept in an
  [indexed heap](generic::index_heap), decayed and bumped as conflicts
  implicate variables.

The [procedures] compose these into the usual loop: propagate to fixed
point, analyse any conflict into an asserting learnt clause, backjump,
and branch, with restarts on the [Luby schedule](generic::luby), periodic
[reduction](procedures::reduce) of the learnt database, and a relocating
[collector](procedures::garbage) for the arena.

# Example

```rust
use stoat_sat::solver::Solver;
use stoat_sat::structures::Lit;

let mut solver = Solver::default();
let p = solver.new_var_default();
let q = solver.new_var_default();

// (p ∨ q) ∧ (¬p ∨ q)
solver.add_clause(&[Lit::new(p, true), Lit::new(q, true)]).unwrap();
solver.add_clause(&[Lit::new(p, false), Lit::new(q, true)]).unwrap();

assert!(solver.solve());
assert_eq!(solver.model_value(q), stoat_sat::structures::LBool::True);
```

# Sharing with observers

A solver is single-threaded, but exposes three things another thread may
hold: approximate [counters](solver::counters), a cooperative
[snapshot hand-off](solver::observe) served at the stable point of the
search loop, and an [interrupt handle](solver::InterruptHandle).

# Logs

The library logs through [log] with the targets listed in [misc::log];
no implementation is linked. With env_logger, for example, propagation
can be singled out with `RUST_LOG=propagation=trace`.
*/

pub mod builder;
pub mod config;
pub mod db;
pub mod generic;
pub mod misc;
pub mod procedures;
pub mod solver;
pub mod structures;
pub mod types;

pub use solver::Solver;
