/*!
The data considered during a solve.

- The [clause arena](clause) owns every clause and hands out compact
  references.
- [Watch lists](watches) index clauses by the literals they watch.
- The [trail](trail) records the valuation in assignment order, delimited
  by decision level.
*/

pub mod clause;
pub mod trail;
pub mod watches;
