/*!
The counter sampler.

A thread reading the solver's shared counters at a fixed cadence, printing
one comment row per tick. Each tick also requests one consistent snapshot
through the hand-off, picking up the clause-to-variable ratio the raw
counters cannot provide. A crossbeam channel carries the shutdown signal;
its receive timeout is the tick.
*/

use std::{sync::Arc, time::Duration};

use crossbeam::channel::{Receiver, RecvTimeoutError};

use stoat_sat::solver::{
    counters::Counters,
    observe::SnapshotPoint,
};

pub fn sample_counters(
    rx: Receiver<()>,
    counters: Arc<Counters>,
    snapshots: Arc<SnapshotPoint>,
    cadence: Duration,
) {
    println!("c      conflicts    decisions propagations     restarts  clause/var");
    loop {
        match rx.recv_timeout(cadence) {
            Err(RecvTimeoutError::Timeout) => {
                snapshots.request();
                let ratio = snapshots
                    .wait(cadence / 2)
                    .map(|snapshot| snapshot.clause_variable_ratio);
                println!(
                    "c   {:12} {:12} {:12} {:12}      {}",
                    Counters::get(&counters.conflicts),
                    Counters::get(&counters.decisions),
                    Counters::get(&counters.propagations),
                    Counters::get(&counters.restarts),
                    match ratio {
                        Some(r) => format!("{r:.4}"),
                        None => "-".to_string(),
                    },
                );
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
