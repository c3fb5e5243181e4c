use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

use crate::domain::auth::ports::Clock;

/// Wall clock backed by `Utc::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Manually driven clock for tests and simulations
#[derive(Debug)]
pub struct FixedClock {
  now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      now: Mutex::new(now),
    }
  }

  pub fn set(&self, now: DateTime<Utc>) {
    *self.lock() = now;
  }

  pub fn advance(&self, by: Duration) {
    let mut now = self.lock();
    *now += by;
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
    // A poisoned clock still holds a valid timestamp.
    self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    *self.lock()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_fixed_clock_advances() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let clock = FixedClock::new(start);

    assert_eq!(clock.now(), start);

    clock.advance(Duration::minutes(15));
    assert_eq!(clock.now(), start + Duration::minutes(15));

    clock.set(start);
    assert_eq!(clock.now(), start);
  }

  #[test]
  fn test_system_clock_moves_forward() {
    let clock = SystemClock;
    let first = clock.now();
    let second = clock.now();

    assert!(second >= first);
  }
}
