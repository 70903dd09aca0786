//! Platform abstraction layer
//!
//! Handles the driver-side collaborators of the simulation:
//! - Key tracking into a move intent
//! - Fixed-step time accumulation

pub mod clock;
pub mod input;

pub use clock::FixedStep;
pub use input::{InputTracker, Key};
