/*!
Targets used with the [log] macros.

No log implementation is linked by the library; binaries choose their own
(the bundled command line uses env_logger). Filtering by target narrows
output to one part of a solve, e.g. `RUST_LOG=propagation=trace`.
*/

/// Targets to be used within a [log] macro.
pub mod targets {
    pub const PROPAGATION: &str = "propagation";
    pub const ANALYSIS: &str = "analysis";
    pub const REDUCTION: &str = "reduction";
    pub const CLAUSE_DB: &str = "clause_db";
    pub const BACKJUMP: &str = "backjump";
    pub const SIMPLIFY: &str = "simplify";
    pub const GC: &str = "gc";
    pub const SEARCH: &str = "search";
}
