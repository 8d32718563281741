/*!
DIMACS CNF input and output.

The reader accepts the standard format: optional comment lines, a
`p cnf <vars> <clauses>` problem line, then clauses as zero-terminated
integer literals in free layout. A `%` line ends the formula early, as in
the SATLIB benchmark files. The declared counts are reported back but not
enforced; variables are created on demand.

The writer emits the current formula compacted: satisfied clauses are
dropped, false literals are dropped from the survivors, and the remaining
variables are renumbered densely from 1. Re-parsing the output into a
fresh solver yields an equisatisfiable formula.
*/

use std::io::{BufRead, Write};

use crate::{
    solver::Solver,
    structures::{LBool, Lit, Var},
    types::err::{ParseError, SolverError},
};

/// Counts gathered while reading a DIMACS file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    pub declared_vars: Option<usize>,
    pub declared_clauses: Option<usize>,
    pub added_clauses: usize,
}

impl Solver {
    /// Reads a DIMACS CNF formula into the solver.
    ///
    /// Clauses take effect immediately; a formula found unsatisfiable
    /// while reading leaves the solver permanently unsatisfiable, visible
    /// through [okay](Solver::okay).
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<ParserInfo, SolverError> {
        let mut info = ParserInfo::default();
        let mut buffer = String::new();
        let mut clause: Vec<Lit> = Vec::new();
        let mut line = 0;

        loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line += 1,
                Err(_) => return Err(ParseError::Line(line).into()),
            }

            match buffer.chars().next() {
                None | Some('c') | Some('\n') => continue,
                Some('%') => break,
                Some('p') => {
                    let mut details = buffer.split_whitespace().skip(1);
                    if details.next() != Some("cnf") {
                        return Err(ParseError::ProblemSpecification.into());
                    }
                    let vars: usize = details
                        .next()
                        .and_then(|s| s.parse().ok())
                        .ok_or(ParseError::ProblemSpecification)?;
                    let clauses: usize = details
                        .next()
                        .and_then(|s| s.parse().ok())
                        .ok_or(ParseError::ProblemSpecification)?;
                    while (self.n_vars() as usize) < vars {
                        self.new_var_default();
                    }
                    info.declared_vars = Some(vars);
                    info.declared_clauses = Some(clauses);
                }
                Some(_) => {
                    for item in buffer.split_whitespace() {
                        if item == "0" {
                            let lits = std::mem::take(&mut clause);
                            self.add_clause(&lits)
                                .map_err(SolverError::OutOfMemory)?;
                            info.added_clauses += 1;
                            continue;
                        }
                        let name: i64 =
                            item.parse().map_err(|_| ParseError::Literal(line))?;
                        if name == 0 {
                            return Err(ParseError::Literal(line).into());
                        }
                        let var = (name.unsigned_abs() - 1) as Var;
                        while self.n_vars() <= var {
                            self.new_var_default();
                        }
                        clause.push(Lit::from_dimacs(name));
                    }
                }
            }
        }

        Ok(info)
    }

    /// Writes the formula as seen by the current top-level assignment,
    /// with `assumps` prefixed as unit clauses.
    pub fn write_dimacs(
        &mut self,
        writer: &mut impl Write,
        assumps: &[Lit],
    ) -> std::io::Result<()> {
        // Make the top-level assignment explicit in what is emitted.
        if self.trail.level() == 0 {
            self.simplify();
        }

        if !self.okay() {
            return writeln!(writer, "p cnf 1 2\n1 0\n-1 0");
        }

        // Dense renumbering over the variables that survive.
        let mut map: Vec<Option<u32>> = vec![None; self.n_vars() as usize];
        let mut mapped: u32 = 0;
        let mut map_var = |v: Var| {
            *map[v as usize].get_or_insert_with(|| {
                mapped += 1;
                mapped
            })
        };

        let live: Vec<_> = self
            .clauses
            .iter()
            .copied()
            .filter(|&cref| !self.satisfied(cref))
            .collect();

        let mut body = Vec::new();
        for &a in assumps {
            debug_assert!(self.value(a) != LBool::False);
            let name = map_var(a.var()) as i64;
            writeln!(body, "{} 0", if a.polarity() { name } else { -name })?;
        }
        for &cref in &live {
            for &lit in self.ca.lits(cref) {
                if self.value(lit) != LBool::False {
                    let name = map_var(lit.var()) as i64;
                    write!(body, "{} ", if lit.polarity() { name } else { -name })?;
                }
            }
            writeln!(body, "0")?;
        }

        writeln!(writer, "p cnf {} {}", mapped, live.len() + assumps.len())?;
        writer.write_all(&body)
    }
}
