//! Opening hours

use chrono::{Local, Timelike};
use serde::Deserialize;
use thiserror::Error;

/// Errors for invalid opening hours.
#[derive(Debug, Error, PartialEq)]
pub enum HoursError {
    /// Closing hour is past the end of the day.
    #[error("closing hour {0} is past 24")]
    ClosesAfterMidnight(u32),

    /// Opening hour is not strictly before closing hour.
    #[error("opening hour {opens} must be before closing hour {closes}")]
    Inverted {
        /// Configured opening hour
        opens: u32,
        /// Configured closing hour
        closes: u32,
    },
}

/// Daily opening window as a half-open range of local hours, `[opens, closes)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    opens: u32,
    closes: u32,
}

impl OpeningHours {
    /// Create a validated opening window.
    ///
    /// # Errors
    ///
    /// Returns a `HoursError` if `closes` is past 24 or `opens` is not before `closes`.
    pub fn new(opens: u32, closes: u32) -> Result<Self, HoursError> {
        let hours = Self { opens, closes };
        hours.validate()?;

        Ok(hours)
    }

    /// Check the window is well formed.
    ///
    /// # Errors
    ///
    /// Returns a `HoursError` if `closes` is past 24 or `opens` is not before `closes`.
    pub fn validate(self) -> Result<(), HoursError> {
        if self.closes > 24 {
            return Err(HoursError::ClosesAfterMidnight(self.closes));
        }

        if self.opens >= self.closes {
            return Err(HoursError::Inverted {
                opens: self.opens,
                closes: self.closes,
            });
        }

        Ok(())
    }

    /// Opening hour (inclusive).
    pub fn opens(self) -> u32 {
        self.opens
    }

    /// Closing hour (exclusive).
    pub fn closes(self) -> u32 {
        self.closes
    }

    /// Whether the restaurant is open during `hour`.
    pub fn is_open_at(self, hour: u32) -> bool {
        (self.opens..self.closes).contains(&hour)
    }

    /// Whether the restaurant is open right now according to `clock`.
    ///
    /// Every call reads the clock again; nothing is cached between calls.
    pub fn is_open<C: Clock + ?Sized>(self, clock: &C) -> bool {
        self.is_open_at(clock.hour())
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            opens: 8,
            closes: 22,
        }
    }
}

/// Source of the current local hour.
pub trait Clock {
    /// Current local wall-clock hour, `0..24`.
    fn hour(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn hour(&self) -> u32 {
        (**self).hour()
    }
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Always reports the same hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.0
    }
}
