//! Duration formatting.
//!
//! Patterns are made of the following tokens. Uppercase letters count the
//! *total* amount in that unit; lowercase letters wrap at the next unit.
//! A doubled letter zero-pads to two digits.
//!
//! | token       | meaning                               |
//! |-------------|---------------------------------------|
//! | `D`, `DD`   | days                                  |
//! | `H`, `HH`   | total hours                           |
//! | `h`, `hh`   | hours, 0-23                           |
//! | `M`, `MM`   | total minutes                         |
//! | `m`, `mm`   | minutes, 0-59                         |
//! | `S`, `SS`   | total seconds                         |
//! | `s`, `ss`   | seconds, 0-59                         |
//! | `X`         | total milliseconds                    |
//! | `x`         | tenths of a second                    |
//! | `xx`        | hundredths of a second                |
//! | `xxx`       | thousandths of a second               |
//!
//! Text between single quotes is copied verbatim, and `''` produces a single
//! quote. Every other character is copied as is.

use std::time::Duration;

/// The pattern used by [`Timer::format`](crate::Timer::format) when none is given.
pub const DEFAULT_TIMER_FORMAT: &str = "H:mm:ss.xx";

/// Pre-computed unit totals for one duration.
struct Parts {
    micros: u128,
    millis: u128,
    seconds: u128,
    minutes: u128,
    hours: u128,
    days: u128,
}

impl Parts {
    fn new(duration: Duration) -> Self {
        let micros = duration.as_micros();
        let seconds = micros / 1_000_000;
        let minutes = seconds / 60;
        let hours = minutes / 60;
        Self {
            micros,
            millis: micros / 1_000,
            seconds,
            minutes,
            hours,
            days: hours / 24,
        }
    }

    /// The value of `token` repeated `run` times.
    fn value(&self, token: char, run: usize) -> Option<u128> {
        let value = match token {
            'D' => self.days,
            'H' => self.hours,
            'h' => self.hours % 24,
            'M' => self.minutes,
            'm' => self.minutes % 60,
            'S' => self.seconds,
            's' => self.seconds % 60,
            'X' => self.millis,
            // 6 - run fractional digits are dropped.
            'x' => (self.micros % 1_000_000) / 10u128.pow(6 - run as u32),
            _ => return None,
        };
        Some(value)
    }
}

/// Longest run of `token` that forms a single field, or 0 for literal text.
fn max_run(token: char) -> usize {
    match token {
        'D' | 'H' | 'h' | 'M' | 'm' | 'S' | 's' => 2,
        'x' => 3,
        'X' => 1,
        _ => 0,
    }
}

/// Render `duration` using `pattern`.
///
/// ```rust
/// use std::time::Duration;
/// use engine_time::format_duration;
///
/// let d = Duration::from_millis(3_725_500);
/// assert_eq!(format_duration(d, "H:mm:ss.xx"), "1:02:05.50");
/// ```
#[must_use]
pub fn format_duration(duration: Duration, pattern: &str) -> String {
    let parts = Parts::new(duration);
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.next_if_eq(&'\'').is_some() {
                out.push('\'');
                continue;
            }
            while let Some(literal) = chars.next() {
                if literal != '\'' {
                    out.push(literal);
                } else if chars.next_if_eq(&'\'').is_some() {
                    out.push('\'');
                } else {
                    break;
                }
            }
            continue;
        }

        let limit = max_run(c);
        let mut run = 1;
        while run < limit && chars.next_if_eq(&c).is_some() {
            run += 1;
        }

        match parts.value(c, run) {
            Some(value) => {
                let width = if c == 'x' { run } else if run == 2 { 2 } else { 1 };
                out.push_str(&format!("{value:0width$}"));
            }
            None => out.push(c),
        }
    }

    out
}
