//! Show simulation
//!
//! Everything that moves lives here. Given the same seed and the same
//! sequence of frame times the show is fully reproducible:
//! - Seeded RNG only (particle velocities)
//! - Launch timing is a pure function of elapsed time
//! - No platform dependencies; drawing and sound go through traits

pub mod flash;
pub mod frame;
pub mod launch;
pub mod particle;
pub mod state;

pub use flash::Flash;
pub use frame::{FrameReport, frame};
pub use launch::{Slot, SlotAction, SlotPhase, cycle_at, local_time};
pub use particle::Particle;
pub use state::Show;
