mod listener;
mod parse;

use std::{
    io::BufReader,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use stoat_sat::{
    solver::Solver,
    structures::LBool,
    types::err::SolverError,
};

fn main() {
    env_logger::init();

    let matches = parse::cli().get_matches();
    let config = parse::config_from_args(&matches);
    let verbosity = config.verbosity;

    let mut solver = Solver::new(config);

    let path = matches
        .get_one::<PathBuf>("path")
        .expect("the path argument is required");
    let start = Instant::now();
    if let Err(e) = load_dimacs(&mut solver, path) {
        eprintln!("c Error loading DIMACS: {e}");
        std::process::exit(1);
    }
    if verbosity >= 1 {
        println!(
            "c Parsed {} variables and {} clauses in {:.2?}",
            solver.n_vars(),
            solver.n_clauses(),
            start.elapsed()
        );
    }

    if let Some(out_path) = matches.get_one::<PathBuf>("dimacs") {
        solver.simplify();
        let mut out = std::fs::File::create(out_path).unwrap_or_else(|e| {
            eprintln!("c Could not create {}: {e}", out_path.display());
            std::process::exit(1);
        });
        if let Err(e) = solver.write_dimacs(&mut out, &[]) {
            eprintln!("c Could not write {}: {e}", out_path.display());
            std::process::exit(1);
        }
        println!("c Wrote simplified instance to {}", out_path.display());
        return;
    }

    if let Some(&budget) = matches.get_one::<i64>("conf_budget") {
        solver.set_conf_budget(budget);
    }
    if let Some(&budget) = matches.get_one::<i64>("prop_budget") {
        solver.set_prop_budget(budget);
    }

    // Counter sampling runs beside the solve and is told to stop once a
    // verdict is in.
    let sampler = matches.get_one::<u64>("stats_cadence").map(|&millis| {
        let (tx, rx) = crossbeam::channel::bounded::<()>(1);
        let counters = solver.counters();
        let snapshots = solver.snapshot_point();
        let cadence = Duration::from_millis(millis.max(1));
        let handle =
            std::thread::spawn(move || listener::sample_counters(rx, counters, snapshots, cadence));
        (tx, handle)
    });

    let result = solver.solve_limited(&[]);

    if let Some((tx, handle)) = sampler {
        let _ = tx.send(());
        let _ = handle.join();
    }

    if verbosity >= 1 {
        solver.print_stats(start.elapsed());
    }

    match result {
        LBool::True => {
            println!("s SATISFIABLE");
            let mut line = String::from("v");
            for v in 0..solver.n_vars() {
                let name = (v + 1) as i64;
                match solver.model_value(v) {
                    LBool::True => line.push_str(&format!(" {name}")),
                    LBool::False => line.push_str(&format!(" {}", -name)),
                    LBool::Undef => {}
                }
            }
            line.push_str(" 0");
            println!("{line}");
            std::process::exit(10)
        }
        LBool::False => {
            println!("s UNSATISFIABLE");
            std::process::exit(20)
        }
        LBool::Undef => {
            if solver.out_of_memory() {
                eprintln!("c Clause storage could not grow.");
            }
            println!("s INDETERMINATE");
            std::process::exit(0)
        }
    }
}

/// Reads a DIMACS file, decompressing by extension.
fn load_dimacs(solver: &mut Solver, path: &Path) -> Result<(), SolverError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("c Could not open {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => {
            solver.read_dimacs(BufReader::new(flate2::read::GzDecoder::new(file)))?;
        }
        Some("xz") => {
            solver.read_dimacs(BufReader::new(xz2::read::XzDecoder::new(file)))?;
        }
        _ => {
            solver.read_dimacs(BufReader::new(file))?;
        }
    }
    Ok(())
}
