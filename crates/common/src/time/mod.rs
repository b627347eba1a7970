//! Time utilities and abstractions
//!
//! - **[`clock`]**: wall-clock abstraction with a real and a mock
//!   implementation
//! - **[`format`]**: human-readable duration formatting
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Duration;
//!
//! use nimbus_common::time::{format_duration, Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::minutes(61));
//! let elapsed = (clock.now() - start).to_std().unwrap_or_default();
//! assert_eq!(format_duration(elapsed), "1h 1m 0s");
//! ```

pub mod clock;
pub mod format;

// Re-export commonly used items
pub use clock::{Clock, MockClock, SystemClock};
pub use format::format_duration;
