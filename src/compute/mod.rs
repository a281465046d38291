//! Compute module - the Gray-Scott numerical engine.

mod driver;
mod engine;
mod grid;
mod progress;
mod seeder;
mod step;
mod stencil;

pub use driver::*;
pub use engine::*;
pub use grid::*;
pub use progress::*;
pub use seeder::*;
pub use step::*;
pub use stencil::*;
