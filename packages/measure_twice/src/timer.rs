use std::hint::black_box;
use std::num::NonZero;

use tracing::trace;

use crate::clock::Clock;
use crate::{DurationPair, Error};

/// Converts a caller-supplied iteration count, rejecting zero.
pub(crate) fn checked_iterations(iterations: u64) -> crate::Result<NonZero<u64>> {
    NonZero::new(iterations).ok_or(Error::InvalidIterationCount { iterations })
}

/// Repeats a block a fixed number of times and measures how long that took.
///
/// The measurement includes the loop itself and the clock reads. No attempt is made to
/// estimate or subtract that overhead.
#[derive(Clone, Debug)]
pub(crate) struct Timer {
    clock: Clock,
}

impl Timer {
    pub(crate) fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Invokes `block` exactly `iterations` times, back to back, and returns the elapsed
    /// processor time and wall time.
    ///
    /// The first error returned by `block` aborts the remaining iterations and is
    /// returned unchanged. No partial measurement is produced in that case.
    pub(crate) fn measure<T, E>(
        &self,
        iterations: NonZero<u64>,
        mut block: impl FnMut() -> Result<T, E>,
    ) -> Result<DurationPair, E> {
        let start = self.clock.sample();

        for _ in 0..iterations.get() {
            black_box(block()?);
        }

        let end = self.clock.sample();

        let (processor_time, wall_time) = end.since(start);
        let pair = DurationPair::new(processor_time, wall_time);

        trace!(iterations = iterations.get(), ?pair, "timed block");

        Ok(pair)
    }
}
