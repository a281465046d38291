//! Worker-thread wrapper around the iteration driver.
//!
//! One engine owns at most one active run. Each run executes on its own
//! dedicated thread and streams [`SimulationEvent`]s over an mpsc channel;
//! the consumer side only ever sees point-in-time grid copies.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use super::{CancelFlag, Simulation, SimulationEvent, StartCommand, StartError};

/// Simulation engine: starts, cancels, and replaces runs.
#[derive(Default)]
pub struct Engine {
    active: Option<ActiveRun>,
}

struct ActiveRun {
    cancel: CancelFlag,
    handle: JoinHandle<()>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `command` and start it on a worker thread, returning the
    /// event receiver.
    ///
    /// Validation happens on the caller's thread, so a failed start returns
    /// the error before any step runs and emits nothing. Any previous run is
    /// cancelled and joined first; its remaining events are discarded by the
    /// channel when the old receiver is dropped.
    pub fn start(&mut self, command: StartCommand) -> Result<Receiver<SimulationEvent>, StartError> {
        self.shutdown();

        let mut simulation = Simulation::new(command)?;
        let (tx, rx): (Sender<SimulationEvent>, Receiver<SimulationEvent>) = mpsc::channel();
        let cancel = CancelFlag::new();
        let flag = cancel.clone();

        let handle = thread::Builder::new()
            .name("gray-scott-run".into())
            .spawn(move || {
                let mut emit = |event: SimulationEvent| {
                    // A dropped receiver just means nobody is watching.
                    let _ = tx.send(event);
                };
                let status = simulation.run(&flag, &mut emit);
                debug!("worker finished with status {status:?}");
            })?;

        info!("simulation run started");
        self.active = Some(ActiveRun { cancel, handle });
        Ok(rx)
    }

    /// Request cooperative cancellation of the active run, if any. The run
    /// still emits its terminal snapshot and completion event.
    pub fn cancel(&self) {
        if let Some(run) = &self.active {
            run.cancel.cancel();
        }
    }

    /// Whether a run has been started and its worker has not yet exited.
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| !run.handle.is_finished())
    }

    /// Cancel the active run and wait for its worker to exit.
    pub fn shutdown(&mut self) {
        if let Some(run) = self.active.take() {
            run.cancel.cancel();
            if run.handle.join().is_err() {
                warn!("simulation worker panicked");
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{RunStatus, Snapshot};
    use crate::schema::SimulationConfig;

    fn test_command(iterations: u64) -> StartCommand {
        StartCommand::fresh(SimulationConfig {
            size: 16,
            iterations,
            snapshot_every: 5,
            ..Default::default()
        })
    }

    fn drain(rx: Receiver<SimulationEvent>) -> Vec<SimulationEvent> {
        rx.iter().collect()
    }

    #[test]
    fn engine_run_completes_and_orders_events() {
        let mut engine = Engine::new();
        let rx = engine.start(test_command(20)).unwrap();
        let events = drain(rx);

        assert!(matches!(
            events.last(),
            Some(SimulationEvent::Complete {
                status: RunStatus::Complete
            })
        ));

        // Snapshots arrive in increasing iteration order.
        let iterations: Vec<u64> = events
            .iter()
            .filter_map(|event| match event {
                SimulationEvent::Snapshot(Snapshot { progress, .. }) => Some(progress.iterations),
                _ => None,
            })
            .collect();
        assert!(iterations.windows(2).all(|w| w[0] <= w[1]));

        engine.shutdown();
        assert!(!engine.is_running());
    }

    #[test]
    fn failed_start_emits_nothing() {
        let mut engine = Engine::new();
        let command = StartCommand::fresh(SimulationConfig {
            size: 0,
            ..Default::default()
        });
        assert!(engine.start(command).is_err());
        assert!(!engine.is_running());
    }

    #[test]
    fn starting_a_new_run_replaces_the_old_one() {
        let mut engine = Engine::new();
        let first_rx = engine.start(test_command(2_000_000)).unwrap();
        let second_rx = engine.start(test_command(10)).unwrap();

        // The replacement joined the first worker, so its channel is closed
        // after at most a partial event stream.
        let first_events = drain(first_rx);
        if let Some(SimulationEvent::Complete { status }) = first_events.last() {
            assert_eq!(*status, RunStatus::Cancelled);
        }

        let second_events = drain(second_rx);
        assert!(matches!(
            second_events.last(),
            Some(SimulationEvent::Complete {
                status: RunStatus::Complete
            })
        ));
    }

    #[test]
    fn cancel_produces_cancelled_terminal_state() {
        let mut engine = Engine::new();
        let rx = engine.start(test_command(5_000_000)).unwrap();
        engine.cancel();
        let events = drain(rx);

        let Some(SimulationEvent::Complete { status }) = events.last() else {
            panic!("run did not complete");
        };
        assert!(status.is_terminal());

        // The terminal snapshot immediately precedes the completion event
        // and shares its status.
        let Some(SimulationEvent::Snapshot(terminal)) = events.get(events.len() - 2) else {
            panic!("no terminal snapshot before completion");
        };
        assert_eq!(terminal.status, *status);
    }
}
