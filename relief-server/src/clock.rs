//! Source of the current hour of day.
//!
//! Congestion depends on local time, so anything that classifies congestion
//! asks a [`Clock`] instead of reading the system time directly.

use chrono::{Local, Timelike};

/// Provides the current local hour (0–23).
pub trait Clock: Send + Sync {
    fn hour(&self) -> u8;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u8 {
        Local::now().hour() as u8
    }
}

/// Always reports the same hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u8);

impl Clock for FixedClock {
    fn hour(&self) -> u8 {
        self.0 % 24
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_in_range() {
        assert!(SystemClock.hour() < 24);
    }

    #[test]
    fn fixed_clock() {
        assert_eq!(FixedClock(8).hour(), 8);
        assert_eq!(FixedClock(25).hour(), 1);
    }
}
