/*!
Generic structures with no knowledge of the solver.
*/

pub mod index_heap;
pub mod luby;
pub mod random;
