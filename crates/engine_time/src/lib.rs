//! # engine_time
//!
//! Time keeping for the engine.
//!
//! - [`SteadyClock`] — the monotonic microsecond source timers read from,
//!   with [`SystemClock`] for real time and [`ManualClock`] for hosts that
//!   drive time by hand.
//! - [`Timer`] — a countdown timer that can be started, paused, resumed,
//!   restarted, and queried at day to microsecond granularity.
//! - [`format_duration`] — renders a duration with the engine's
//!   `H:mm:ss.xx`-style pattern language.

pub mod clock;
pub mod format;
pub mod timer;

pub use clock::{ManualClock, SteadyClock, SystemClock};
pub use format::{DEFAULT_TIMER_FORMAT, format_duration};
pub use timer::{Timer, duration_from_secs_f64, duration_from_secs_i64};
