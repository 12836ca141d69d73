// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Interval timer for automatic backups, polled from the tick action.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupSchedule {
	interval: Duration,
	last: Instant,
}

impl BackupSchedule {
	/// The first run is due one `interval` after `start`.
	pub fn new(interval: Duration, start: Instant) -> Self {
		Self {
			interval,
			last: start,
		}
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Whether a run is due at `now`. A due poll restarts the interval.
	pub fn poll(&mut self, now: Instant) -> bool {
		if now.saturating_duration_since(self.last) < self.interval {
			return false;
		}
		self.last = now;
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_due_after_interval() {
		let start = Instant::now();
		let mut schedule = BackupSchedule::new(Duration::from_secs(60), start);

		assert!(!schedule.poll(start));
		assert!(!schedule.poll(start + Duration::from_secs(59)));
		assert!(schedule.poll(start + Duration::from_secs(61)));
		assert!(!schedule.poll(start + Duration::from_secs(90)));
		assert!(schedule.poll(start + Duration::from_secs(121)));
	}

	#[test]
	fn test_clock_going_backwards_is_not_due() {
		let start = Instant::now() + Duration::from_secs(10);
		let mut schedule = BackupSchedule::new(Duration::from_secs(5), start);
		assert!(!schedule.poll(start - Duration::from_secs(10)));
	}
}
