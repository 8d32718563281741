/*!
Building a solver from external input, and writing its state back out.
*/

pub mod dimacs;
pub use dimacs::ParserInfo;
