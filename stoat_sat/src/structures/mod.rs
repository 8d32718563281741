/*!
The abstract elements of a solve and their representation.

- [Variables](Var) are dense indices handed out by the solver.
- [Literals](Lit) pair a variable with a polarity, packed so that negation is
  a single bit flip.
- [Lifted booleans](LBool) extend `bool` with an undefined value, for partial
  valuations.

Clauses have no free-standing representation: they live in the
[clause arena](crate::db::clause) and are addressed by reference.
*/

mod lbool;
pub use lbool::LBool;

mod literal;
pub use literal::{Lit, Var};
