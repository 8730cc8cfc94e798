//! Clock abstraction used by expiry-aware backends and the storage client.

use std::{cell::Cell, rc::Rc};

use chrono::{DateTime, TimeZone, Utc};

/// Source of the current instant.
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Wall clock (`Date.now()` on wasm32 through chrono's wasm bindings).
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
/// Manually advanced clock with shared state, for tests and replay.
pub struct ManualClock {
    unix_seconds: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Creates a clock frozen at `instant`.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            unix_seconds: Rc::new(Cell::new(instant.timestamp())),
        }
    }

    /// Moves every handle of this clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.unix_seconds
            .set(self.unix_seconds.get().saturating_add(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.unix_seconds.get(), 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_handles_share_time() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::at(start);
        let other = clock.clone();

        other.advance(11);

        assert_eq!(clock.now().timestamp() - start.timestamp(), 11);
    }
}
