//! Gray-Scott reaction-diffusion simulation engine.
//!
//! Two chemical concentration fields evolve on a square toroidal grid under
//! 3x3 stencil diffusion and the nonlinear Gray-Scott feed/kill reaction.
//! The engine runs on a dedicated worker thread, streams point-in-time grid
//! snapshots to a consumer over a channel, supports cooperative
//! cancellation, and can resume from a previously emitted snapshot.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and seed-shape types
//! - `compute`: The numerical engine (grid, stencil, step, driver, worker)
//!
//! # Example
//!
//! ```rust,no_run
//! use gray_scott::{Engine, SimulationConfig, SimulationEvent, Shape, StartCommand};
//!
//! let config = SimulationConfig {
//!     size: 128,
//!     shape: Shape::Circle,
//!     iterations: 1000,
//!     snapshot_every: 100,
//!     ..Default::default()
//! };
//!
//! let mut engine = Engine::new();
//! let events = engine.start(StartCommand::fresh(config)).unwrap();
//!
//! for event in events {
//!     match event {
//!         SimulationEvent::Snapshot(snapshot) => {
//!             println!("{}: {} cells", snapshot.progress, snapshot.grid.cells().len());
//!         }
//!         SimulationEvent::Complete { status } => println!("done: {status:?}"),
//!         _ => {}
//!     }
//! }
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    CancelFlag, Cell, Engine, Grid, ProgressState, ResumeState, RunStatus, Simulation,
    SimulationEvent, Snapshot, StartCommand, StartError,
};
pub use schema::{ConfigError, Shape, SimulationConfig, UnknownShapeError};
