//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

#[derive(Debug)]
struct FakePlatformState {
    processor_time: Duration,
    wall_time: Duration,
}

/// Fake platform whose clocks are set by the test.
///
/// Clones share state, so a test can keep one clone and move time forward while the
/// code under test reads through another (including from inside a benchmarked block).
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                processor_time: Duration::ZERO,
                wall_time: Duration::ZERO,
            })),
        }
    }

    pub(crate) fn set_processor_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .processor_time = time;
    }

    pub(crate) fn set_wall_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .wall_time = time;
    }

    /// Moves both clocks forward by the given amounts.
    pub(crate) fn advance(&self, processor: Duration, wall: Duration) {
        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        state.processor_time = state
            .processor_time
            .checked_add(processor)
            .expect("fake processor time overflow");
        state.wall_time = state
            .wall_time
            .checked_add(wall)
            .expect("fake wall time overflow");
    }
}

impl Platform for FakePlatform {
    fn processor_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .processor_time
    }

    fn wall_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .wall_time
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_time() {
        let platform = FakePlatform::new();
        assert_eq!(platform.processor_time(), Duration::ZERO);
        assert_eq!(platform.wall_time(), Duration::ZERO);
    }

    #[test]
    fn advance_moves_both_clocks() {
        let platform = FakePlatform::new();
        platform.set_processor_time(Duration::from_millis(10));

        platform.advance(Duration::from_millis(5), Duration::from_millis(7));

        assert_eq!(platform.processor_time(), Duration::from_millis(15));
        assert_eq!(platform.wall_time(), Duration::from_millis(7));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.set_processor_time(Duration::from_millis(100));
        assert_eq!(platform2.processor_time(), Duration::from_millis(100));

        platform2.set_wall_time(Duration::from_millis(200));
        assert_eq!(platform1.wall_time(), Duration::from_millis(200));
    }
}
