//! Request identifier generation.

/// Default ceiling for request identifiers.
pub const DEFAULT_MAX_ID: u32 = 1024;

/// Produces request ids `1..=max`, then starts over at 1.
///
/// Wraparound does not check for in-flight ids: a client issues one request
/// at a time and waits for its response before sending the next.
#[derive(Debug, Clone)]
pub struct RequestIdSequencer {
	last: u32,
	max: u32,
}

impl RequestIdSequencer {
	pub fn new() -> Self {
		Self::with_max(DEFAULT_MAX_ID)
	}

	/// A `max` of 0 is treated as 1.
	pub fn with_max(max: u32) -> Self {
		Self { last: 0, max: max.max(1) }
	}

	pub fn next_id(&mut self) -> u32 {
		if self.last >= self.max {
			self.last = 0;
		}
		self.last += 1;
		self.last
	}

	pub fn max(&self) -> u32 {
		self.max
	}
}

impl Default for RequestIdSequencer {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_at_one_and_increments() {
		let mut ids = RequestIdSequencer::new();
		assert_eq!(ids.next_id(), 1);
		assert_eq!(ids.next_id(), 2);
		assert_eq!(ids.next_id(), 3);
	}

	#[test]
	fn wraps_after_ceiling() {
		let mut ids = RequestIdSequencer::new();
		let emitted: Vec<u32> = (0..DEFAULT_MAX_ID).map(|_| ids.next_id()).collect();
		assert_eq!(emitted.first(), Some(&1));
		assert_eq!(emitted.last(), Some(&DEFAULT_MAX_ID));
		assert_eq!(ids.next_id(), 1);
	}

	#[test]
	fn never_exceeds_small_ceiling() {
		let mut ids = RequestIdSequencer::with_max(3);
		let emitted: Vec<u32> = (0..7).map(|_| ids.next_id()).collect();
		assert_eq!(emitted, vec![1, 2, 3, 1, 2, 3, 1]);
	}

	#[test]
	fn zero_ceiling_is_clamped() {
		let mut ids = RequestIdSequencer::with_max(0);
		assert_eq!(ids.next_id(), 1);
		assert_eq!(ids.next_id(), 1);
	}
}
