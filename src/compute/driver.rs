//! Iteration driver: owns the double buffer and runs the step loop.
//!
//! A `Simulation` is constructed from a validated [`StartCommand`] and then
//! driven to completion with [`Simulation::run`], which emits
//! [`SimulationEvent`]s through a caller-supplied sink. Running on a worker
//! thread with a channel sink is handled by [`super::Engine`]; tests drive
//! the loop synchronously with a closure.

use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, SimulationConfig};

use super::{Cell, Grid, ProgressState, ProgressTracker, seed_grid, step_into};

/// Everything needed to start a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCommand {
    pub config: SimulationConfig,
    /// Carried-over state from a previous run's terminal snapshot. None
    /// seeds a fresh grid from `config.shape`.
    #[serde(default)]
    pub resume: Option<ResumeState>,
}

impl StartCommand {
    /// Fresh run from a config.
    pub fn fresh(config: SimulationConfig) -> Self {
        Self {
            config,
            resume: None,
        }
    }
}

/// The persisted grid/progress pair a caller round-trips to continue a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeState {
    pub grid: Grid,
    pub progress: ProgressState,
}

/// Start-time validation errors. All of these surface before any step runs;
/// a failed start emits no events and leaks no partial state.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Carried grid is {carried}x{carried} but the run requests {requested}x{requested}")]
    DimensionMismatch { carried: usize, requested: usize },
    #[error("Failed to spawn simulation worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// How a run ended, or that it has not ended yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Mid-run cadence snapshot.
    Running,
    /// The iteration budget was exhausted.
    Complete,
    /// The run was cancelled before exhausting its budget.
    Cancelled,
}

impl RunStatus {
    /// Terminal states are safe continuation points.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// Point-in-time copy of the grid plus progress metadata.
///
/// The grid is cloned on emit; the driver never mutates a grid it has handed
/// out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub progress: ProgressState,
    pub status: RunStatus,
}

/// Events emitted by a run, in strictly increasing iteration order.
/// `Complete` is always the last event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// Periodic throughput report; `Display` on the payload gives the
    /// human-readable summary.
    Progress(ProgressState),
    Snapshot(Snapshot),
    Complete { status: RunStatus },
    /// Free-form informational text, non-critical.
    Diagnostic(String),
}

/// Cooperative cancellation flag, checked between steps.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A single simulation run: configuration, double buffer, progress tracker.
pub struct Simulation {
    config: SimulationConfig,
    current: Grid,
    next: Grid,
    tracker: ProgressTracker,
}

impl Simulation {
    /// Validate the command and build the starting state, either by seeding
    /// a fresh grid or by adopting the carried one.
    pub fn new(command: StartCommand) -> Result<Self, StartError> {
        let StartCommand { config, resume } = command;
        config.validate()?;

        let (current, tracker) = match resume {
            Some(resume) => {
                if resume.grid.size() != config.size {
                    return Err(StartError::DimensionMismatch {
                        carried: resume.grid.size(),
                        requested: config.size,
                    });
                }
                let tracker = ProgressTracker::resumed(&resume.progress);
                (resume.grid, tracker)
            }
            None => {
                let grid = seed_grid(config.shape, config.size, config.rng_seed);
                (grid, ProgressTracker::fresh())
            }
        };

        let next = Grid::filled(config.size, Cell::default());
        Ok(Self {
            config,
            current,
            next,
            tracker,
        })
    }

    /// The grid as of the last completed step.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn progress(&self) -> ProgressState {
        self.tracker.state()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Perform one update step and swap the buffers.
    pub fn step(&mut self) {
        step_into(&self.current, &mut self.next, &self.config);
        mem::swap(&mut self.current, &mut self.next);
    }

    /// Run the step loop to completion or cancellation, emitting events into
    /// `emit`. Returns the terminal status.
    ///
    /// After step `i` (1-based), a `Running` snapshot is emitted when `i` is
    /// a multiple of `snapshot_every` or the final step. Termination emits
    /// exactly one terminal snapshot carrying the latest grid, then the
    /// `Complete` event.
    pub fn run(
        &mut self,
        cancel: &CancelFlag,
        emit: &mut dyn FnMut(SimulationEvent),
    ) -> RunStatus {
        let total = self.config.iterations;
        emit(SimulationEvent::Diagnostic(format!(
            "run start: {size}x{size} `{shape}` grid, {total} iteration budget, \
             snapshot every {every}, resumed at itn {count}",
            size = self.config.size,
            shape = self.config.shape,
            every = self.config.snapshot_every,
            count = self.tracker.count(),
        )));

        let mut status = RunStatus::Complete;
        for i in 1..=total {
            if cancel.is_cancelled() {
                debug!("cancellation observed before step {i}");
                status = RunStatus::Cancelled;
                break;
            }

            self.step();
            if let Some(report) = self.tracker.increment() {
                emit(SimulationEvent::Progress(report));
            }

            if i % self.config.snapshot_every == 0 || i == total {
                emit(SimulationEvent::Snapshot(Snapshot {
                    grid: self.current.clone(),
                    progress: self.tracker.state(),
                    status: RunStatus::Running,
                }));
            }
        }

        emit(SimulationEvent::Snapshot(Snapshot {
            grid: self.current.clone(),
            progress: self.tracker.state(),
            status,
        }));
        emit(SimulationEvent::Complete { status });
        status
    }
}
