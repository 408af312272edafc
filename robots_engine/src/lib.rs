//! # robots_engine
//!
//! Drives robots around a bounded rectangular grid from textual scripts.
//!
//! Each robot starts at a position and bearing and follows a string of `L`, `R`
//! and `F` instructions. A robot that drives off the grid is lost and leaves a
//! scent on the cell it fell from. Later robots will not step off the grid from a
//! scented cell.
//!
//! ```
//! let input = "5 3\n1 1 E\nRFRFRFRF\n\n3 2 N\nFRRFLLFFRRFLL\n\n0 3 W\nLLFFFLFLFL";
//! assert_eq!(
//!     robots_engine::drive_robots(input).unwrap(),
//!     "1 1 E\n3 3 N LOST\n2 3 S"
//! );
//! ```

pub mod simulation;
pub use simulation::drive_robots;
pub use simulation::start_simulation;
pub use simulation::Report;
pub use simulation::Simulation;

pub use entities::{Bearing, Instruction, Position, Rotation};
pub use error::{SimulationError, SimulationResult};
pub use map::Grid;

mod entities;
mod error;
mod map;
mod replay;
