use chrono::{Local, Timelike};

/// Wall-clock capability used for the day/night qualifier.
pub trait Clock: Send + Sync {
    /// Current hour in the local time zone, 0–23.
    fn current_hour(&self) -> u32;
}

/// Reads the hour from the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Always reports the same hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn current_hour(&self) -> u32 {
        self.0
    }
}
