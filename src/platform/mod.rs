//! Platform abstraction layer
//!
//! Host plumbing that does not depend on a particular platform:
//! - Scoped release of timers and listeners
//! - Raw press to gesture recognition
//! - Fixed-step pacing of the tick timer

pub mod input;
pub mod teardown;
pub mod time;

pub use input::PressTracker;
pub use teardown::{Teardown, TeardownStack};
pub use time::FixedStep;
