//! Countdown timer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::clock::{SteadyClock, SystemClock};
use crate::format::{DEFAULT_TIMER_FORMAT, format_duration};

const MICROS_PER_MILLI: i64 = 1_000;
const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

/// Convert seconds to a [`Duration`], clamping negative and NaN input to
/// zero and overly large input to [`Duration::MAX`].
#[must_use]
pub fn duration_from_secs_f64(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

/// Convert whole seconds to a [`Duration`], clamping negative input to zero.
#[must_use]
pub fn duration_from_secs_i64(seconds: i64) -> Duration {
    Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
}

/// A countdown timer.
///
/// A timer counts its remaining time down from [`Timer::duration`] to zero
/// while it is running. It has three states:
///
/// - **stopped** — not started; the remaining time is the full duration.
/// - **running** — counting down.
/// - **paused** — started, but the remaining time is frozen.
///
/// All queries (`days`, `seconds`, `progress1_0`, ...) report the
/// *remaining* time. Integer queries truncate; the 32-bit variants saturate
/// at `i32::MAX`.
///
/// Timers read time from a shared [`SteadyClock`]; hosts that step time
/// themselves can pass a [`ManualClock`](crate::ManualClock).
#[derive(Debug, Clone)]
pub struct Timer {
    duration: Duration,
    /// Remaining time at the last start, resume, or `set`; the frozen value
    /// while paused.
    remaining_at_mark: Duration,
    /// Clock reading in microseconds at the last start, resume, or `set`.
    mark: u64,
    started: bool,
    paused: bool,
    clock: Arc<dyn SteadyClock>,
}

impl Timer {
    /// Create a timer on the shared system clock.
    #[must_use]
    pub fn new(duration: Duration, start_immediately: bool) -> Self {
        Self::with_clock(duration, start_immediately, SystemClock::shared())
    }

    /// Create a timer from a duration in seconds.
    ///
    /// See [`duration_from_secs_f64`] for how out-of-range input is handled.
    #[must_use]
    pub fn from_secs_f64(seconds: f64, start_immediately: bool) -> Self {
        Self::new(duration_from_secs_f64(seconds), start_immediately)
    }

    /// Create a timer that reads time from `clock`.
    #[must_use]
    pub fn with_clock(
        duration: Duration,
        start_immediately: bool,
        clock: Arc<dyn SteadyClock>,
    ) -> Self {
        let mark = clock.microsec();
        let mut timer = Self {
            duration,
            remaining_at_mark: duration,
            mark,
            started: false,
            paused: false,
            clock,
        };
        if start_immediately {
            timer.start();
        }
        timer
    }

    /// Start the timer.
    ///
    /// A stopped timer starts counting down from its full duration. A paused
    /// timer resumes. A running timer is left alone.
    pub fn start(&mut self) {
        if !self.started {
            self.restart();
        } else if self.paused {
            self.resume();
        }
    }

    /// Freeze the remaining time. Has no effect unless running.
    pub fn pause(&mut self) {
        if self.is_running() {
            self.remaining_at_mark = self.remaining();
            self.paused = true;
            trace!(remaining_us = self.remaining_at_mark.as_micros(), "timer paused");
        }
    }

    /// Continue counting down after [`Timer::pause`]. Has no effect unless
    /// paused.
    pub fn resume(&mut self) {
        if self.is_paused() {
            self.mark = self.clock.microsec();
            self.paused = false;
            trace!(remaining_us = self.remaining_at_mark.as_micros(), "timer resumed");
        }
    }

    /// Start counting down from the full duration, whatever the current state.
    pub fn restart(&mut self) {
        self.remaining_at_mark = self.duration;
        self.mark = self.clock.microsec();
        self.started = true;
        self.paused = false;
        trace!(duration_us = self.duration.as_micros(), "timer started");
    }

    /// Replace the duration, then [`Timer::restart`].
    pub fn restart_with(&mut self, duration: Duration) {
        self.duration = duration;
        self.restart();
    }

    /// Replace the duration and refill the remaining time.
    ///
    /// The state is kept: a running timer keeps running from the new
    /// duration, a paused one stays paused at it, and a stopped one stays
    /// stopped.
    pub fn set(&mut self, duration: Duration) {
        self.duration = duration;
        self.remaining_at_mark = duration;
        self.mark = self.clock.microsec();
    }

    /// Stop the timer and refill the remaining time.
    pub fn reset(&mut self) {
        self.remaining_at_mark = self.duration;
        self.started = false;
        self.paused = false;
    }

    /// The full countdown length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The time left before the timer reaches zero.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        if !self.started {
            return self.duration;
        }
        if self.paused {
            return self.remaining_at_mark;
        }
        let elapsed = self.clock.microsec().saturating_sub(self.mark);
        self.remaining_at_mark
            .saturating_sub(Duration::from_micros(elapsed))
    }

    /// `true` once the timer has been started (running or paused).
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// `true` while the timer is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.started && self.paused
    }

    /// `true` while the timer is counting down. Stays `true` after the
    /// remaining time reaches zero until the timer is paused or reset.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started && !self.paused
    }

    /// `true` when no time remains.
    #[must_use]
    pub fn reached_zero(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Remaining fraction of the duration, from 1.0 down to 0.0.
    ///
    /// A zero-length timer reports 0.0.
    #[must_use]
    pub fn progress1_0(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.remaining().as_secs_f64() / self.duration.as_secs_f64()
    }

    /// Elapsed fraction of the duration, from 0.0 up to 1.0.
    #[must_use]
    pub fn progress0_1(&self) -> f64 {
        1.0 - self.progress1_0()
    }

    /// Remaining whole microseconds.
    #[must_use]
    pub fn micros(&self) -> i64 {
        i64::try_from(self.remaining().as_micros()).unwrap_or(i64::MAX)
    }

    /// Remaining microseconds as a float.
    #[must_use]
    pub fn micros_f(&self) -> f64 {
        self.remaining().as_secs_f64() * 1e6
    }

    /// Remaining whole milliseconds, saturating at `i32::MAX`.
    #[must_use]
    pub fn millis(&self) -> i32 {
        saturate(self.millis64())
    }

    /// Remaining whole milliseconds.
    #[must_use]
    pub fn millis64(&self) -> i64 {
        self.micros() / MICROS_PER_MILLI
    }

    /// Remaining milliseconds as a float.
    #[must_use]
    pub fn millis_f(&self) -> f64 {
        self.remaining().as_secs_f64() * 1e3
    }

    /// Remaining whole seconds, saturating at `i32::MAX`.
    #[must_use]
    pub fn seconds(&self) -> i32 {
        saturate(self.seconds64())
    }

    /// Remaining whole seconds.
    #[must_use]
    pub fn seconds64(&self) -> i64 {
        self.micros() / MICROS_PER_SECOND
    }

    /// Remaining seconds as a float.
    #[must_use]
    pub fn seconds_f(&self) -> f64 {
        self.remaining().as_secs_f64()
    }

    /// Remaining whole minutes, saturating at `i32::MAX`.
    #[must_use]
    pub fn minutes(&self) -> i32 {
        saturate(self.minutes64())
    }

    /// Remaining whole minutes.
    #[must_use]
    pub fn minutes64(&self) -> i64 {
        self.micros() / MICROS_PER_MINUTE
    }

    /// Remaining minutes as a float.
    #[must_use]
    pub fn minutes_f(&self) -> f64 {
        self.remaining().as_secs_f64() / 60.0
    }

    /// Remaining whole hours, saturating at `i32::MAX`.
    #[must_use]
    pub fn hours(&self) -> i32 {
        saturate(self.hours64())
    }

    /// Remaining whole hours.
    #[must_use]
    pub fn hours64(&self) -> i64 {
        self.micros() / MICROS_PER_HOUR
    }

    /// Remaining hours as a float.
    #[must_use]
    pub fn hours_f(&self) -> f64 {
        self.remaining().as_secs_f64() / 3_600.0
    }

    /// Remaining whole days, saturating at `i32::MAX`.
    #[must_use]
    pub fn days(&self) -> i32 {
        saturate(self.days64())
    }

    /// Remaining whole days.
    #[must_use]
    pub fn days64(&self) -> i64 {
        self.micros() / MICROS_PER_DAY
    }

    /// Remaining days as a float.
    #[must_use]
    pub fn days_f(&self) -> f64 {
        self.remaining().as_secs_f64() / 86_400.0
    }

    /// Render the remaining time with a [`format_duration`] pattern.
    #[must_use]
    pub fn format(&self, pattern: &str) -> String {
        format_duration(self.remaining(), pattern)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(Duration::ZERO, false)
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_TIMER_FORMAT))
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use crate::clock::ManualClock;

    use super::*;

    fn manual(seconds: u64, start_immediately: bool) -> (Arc<ManualClock>, Timer) {
        let clock = Arc::new(ManualClock::new());
        let timer = Timer::with_clock(
            Duration::from_secs(seconds),
            start_immediately,
            clock.clone(),
        );
        (clock, timer)
    }

    #[test]
    fn test_stopped_timer_reports_full_duration() {
        let (clock, timer) = manual(10, false);
        clock.advance(Duration::from_secs(3));
        assert!(!timer.is_started());
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), Duration::from_secs(10));
        assert_eq!(timer.seconds(), 10);
    }

    #[test]
    fn test_running_timer_counts_down() {
        let (clock, timer) = manual(10, true);
        clock.advance(Duration::from_millis(2_500));
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), Duration::from_millis(7_500));
        assert_eq!(timer.seconds(), 7);
        assert_eq!(timer.millis(), 7_500);
        assert!((timer.seconds_f() - 7.5).abs() < 1e-9);
        assert!((timer.progress1_0() - 0.75).abs() < 1e-9);
        assert!((timer.progress0_1() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_remaining_stops_at_zero() {
        let (clock, timer) = manual(1, true);
        clock.advance(Duration::from_secs(5));
        assert!(timer.reached_zero());
        assert!(timer.is_running());
        assert_eq!(timer.micros(), 0);
        assert_eq!(timer.progress0_1(), 1.0);
    }

    #[test]
    fn test_pause_and_resume() {
        let (clock, mut timer) = manual(10, true);
        clock.advance(Duration::from_secs(4));
        timer.pause();
        assert!(timer.is_paused());
        assert!(!timer.is_running());

        clock.advance(Duration::from_secs(100));
        assert_eq!(timer.seconds(), 6);

        timer.resume();
        clock.advance(Duration::from_secs(1));
        assert_eq!(timer.seconds(), 5);
    }

    #[test]
    fn test_start_resumes_paused_timer() {
        let (clock, mut timer) = manual(10, true);
        clock.advance(Duration::from_secs(3));
        timer.pause();
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.seconds(), 7);
    }

    #[test]
    fn test_start_on_running_timer_is_noop() {
        let (clock, mut timer) = manual(10, true);
        clock.advance(Duration::from_secs(3));
        timer.start();
        assert_eq!(timer.seconds(), 7);
    }

    #[test]
    fn test_pause_and_resume_ignored_in_wrong_state() {
        let (clock, mut timer) = manual(10, false);
        timer.pause();
        assert!(!timer.is_paused());
        timer.resume();
        assert!(!timer.is_started());

        timer.start();
        timer.resume();
        clock.advance(Duration::from_secs(1));
        assert_eq!(timer.seconds(), 9);
    }

    #[test]
    fn test_restart_refills() {
        let (clock, mut timer) = manual(10, true);
        clock.advance(Duration::from_secs(8));
        timer.pause();
        timer.restart();
        assert!(timer.is_running());
        assert_eq!(timer.seconds(), 10);

        timer.restart_with(Duration::from_secs(3));
        clock.advance(Duration::from_secs(1));
        assert_eq!(timer.duration(), Duration::from_secs(3));
        assert_eq!(timer.seconds(), 2);
    }

    #[test]
    fn test_set_keeps_state() {
        let (clock, mut timer) = manual(10, true);
        clock.advance(Duration::from_secs(4));
        timer.set(Duration::from_secs(20));
        assert!(timer.is_running());
        clock.advance(Duration::from_secs(5));
        assert_eq!(timer.seconds(), 15);

        timer.pause();
        timer.set(Duration::from_secs(30));
        assert!(timer.is_paused());
        clock.advance(Duration::from_secs(5));
        assert_eq!(timer.seconds(), 30);

        let (_, mut stopped) = manual(1, false);
        stopped.set(Duration::from_secs(2));
        assert!(!stopped.is_started());
        assert_eq!(stopped.seconds(), 2);
    }

    #[test]
    fn test_reset_stops() {
        let (clock, mut timer) = manual(10, true);
        clock.advance(Duration::from_secs(4));
        timer.reset();
        assert!(!timer.is_started());
        assert_eq!(timer.seconds(), 10);
    }

    #[test]
    fn test_unit_queries() {
        let (_, timer) = manual(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5, false);
        assert_eq!(timer.days(), 2);
        assert_eq!(timer.days64(), 2);
        assert_eq!(timer.hours(), 51);
        assert_eq!(timer.minutes64(), 51 * 60 + 4);
        assert_eq!(timer.seconds64(), 183_845);
        assert_eq!(timer.millis64(), 183_845_000);
        assert_eq!(timer.micros(), 183_845_000_000);
        assert!((timer.hours_f() - 183_845.0 / 3_600.0).abs() < 1e-9);
        assert!((timer.days_f() - 183_845.0 / 86_400.0).abs() < 1e-9);
    }

    #[test]
    fn test_32bit_queries_saturate() {
        let (_, timer) = manual(u64::from(u32::MAX), false);
        assert_eq!(timer.millis(), i32::MAX);
        assert_eq!(timer.millis64(), i64::from(u32::MAX) * 1_000);
    }

    #[test]
    fn test_zero_duration_progress() {
        let (_, timer) = manual(0, true);
        assert!(timer.reached_zero());
        assert_eq!(timer.progress1_0(), 0.0);
        assert_eq!(timer.progress0_1(), 1.0);
    }

    #[test]
    fn test_format_uses_remaining_time() {
        let (clock, timer) = manual(3_725, true);
        clock.advance(Duration::from_millis(500));
        assert_eq!(timer.format(DEFAULT_TIMER_FORMAT), "1:02:04.50");
        assert_eq!(timer.to_string(), "1:02:04.50");
    }

    #[test]
    fn test_duration_from_secs_clamps() {
        assert_eq!(duration_from_secs_f64(-1.0), Duration::ZERO);
        assert_eq!(duration_from_secs_f64(f64::NAN), Duration::ZERO);
        assert_eq!(duration_from_secs_f64(f64::INFINITY), Duration::MAX);
        assert_eq!(duration_from_secs_f64(1.5), Duration::from_millis(1_500));
    }

    #[test]
    fn test_duration_from_whole_secs_clamps() {
        assert_eq!(duration_from_secs_i64(-5), Duration::ZERO);
        assert_eq!(duration_from_secs_i64(0), Duration::ZERO);
        assert_eq!(duration_from_secs_i64(90), Duration::from_secs(90));
    }
}
