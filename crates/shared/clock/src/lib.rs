//! Hermes Clock Infrastructure
//!
//! Time sources behind the [`Clock`] port:
//!
//! - [`SystemClock`]: wall-clock time for production
//! - [`ManualClock`]: frozen time that only moves when told to, for
//!   deterministic arrival ordering in tests and replays
//!
//! ## Usage
//!
//! ```ignore
//! use hermes_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::starting_now();
//! let t0 = clock.now();
//! clock.advance(Duration::seconds(1));
//! assert!(clock.now() > t0);
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use hermes_ports::Clock;
