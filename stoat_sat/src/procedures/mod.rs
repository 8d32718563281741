/*!
The procedures of a solve.

Each file extends [Solver](crate::solver::Solver) with one piece of the
conflict-driven clause-learning algorithm:

- [propagate] --- exhaustive unit propagation over the trail.
- [analysis] --- derivation of an asserting clause from a conflict.
- [backjump] --- non-chronological backtracking with phase saving.
- [simplify] --- top-level clause database simplification.
- [reduce] --- removal of unhelpful learnt clauses.
- [garbage] --- relocating collection of the clause arena.
- [search] --- the outer loop composing all of the above with branching,
  restarts, and assumption handling.
*/

pub mod analysis;
pub mod backjump;
pub mod garbage;
pub mod propagate;
pub mod reduce;
pub mod search;
pub mod simplify;
