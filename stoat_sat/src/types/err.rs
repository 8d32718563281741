/*!
Error types used in the library.

Conditions that are part of normal solving --- a conflict, an exhausted
budget, a formula proven unsatisfiable at the top level --- are ordinary
return values, not errors. What remains is the failure to grow the clause
arena, and problems with DIMACS input.
*/

/// The clause arena could not grow, or its offset space is exhausted.
///
/// The solver that raised this is no longer usable for solving; drivers
/// should report an indeterminate result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfMemory;

impl std::fmt::Display for OutOfMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "clause arena allocation failed")
    }
}

impl std::error::Error for OutOfMemory {}

/// Problems with DIMACS input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The `p cnf <vars> <clauses>` header is malformed.
    ProblemSpecification,

    /// A literal could not be read at the given line.
    Literal(usize),

    /// Reading failed at the given line.
    Line(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseError::ProblemSpecification => write!(f, "malformed problem line"),
            ParseError::Literal(line) => write!(f, "unreadable literal at line {line}"),
            ParseError::Line(line) => write!(f, "read failure at line {line}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A union of the failures a driver may see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverError {
    OutOfMemory(OutOfMemory),
    Parse(ParseError),
}

impl From<OutOfMemory> for SolverError {
    fn from(e: OutOfMemory) -> Self {
        SolverError::OutOfMemory(e)
    }
}

impl From<ParseError> for SolverError {
    fn from(e: ParseError) -> Self {
        SolverError::Parse(e)
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SolverError::OutOfMemory(e) => e.fmt(f),
            SolverError::Parse(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SolverError {}
