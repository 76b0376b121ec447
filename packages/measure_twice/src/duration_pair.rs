use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::time::Duration;

/// The result of one timed run: processor time and wall time elapsed.
///
/// Pairs are never modified after a measurement produces them, only summed. Summation
/// is element-wise.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use measure_twice::DurationPair;
///
/// let a = DurationPair::new(Duration::from_millis(10), Duration::from_millis(12));
/// let b = DurationPair::new(Duration::from_millis(5), Duration::from_millis(30));
///
/// let total = a + b;
/// assert_eq!(total.processor_time(), Duration::from_millis(15));
/// assert_eq!(total.wall_time(), Duration::from_millis(42));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DurationPair {
    processor_time: Duration,
    wall_time: Duration,
}

impl DurationPair {
    /// A pair where both durations are zero.
    pub const ZERO: Self = Self::new(Duration::ZERO, Duration::ZERO);

    /// Creates a pair from a processor time and a wall time.
    #[must_use]
    pub const fn new(processor_time: Duration, wall_time: Duration) -> Self {
        Self {
            processor_time,
            wall_time,
        }
    }

    /// Processor time consumed by the process during the measured run.
    #[must_use]
    pub const fn processor_time(&self) -> Duration {
        self.processor_time
    }

    /// Real time that elapsed during the measured run.
    #[must_use]
    pub const fn wall_time(&self) -> Duration {
        self.wall_time
    }

    /// Processor time in seconds, as used in rendered output.
    #[must_use]
    pub fn processor_secs(&self) -> f64 {
        self.processor_time.as_secs_f64()
    }

    /// Wall time in seconds, as used in rendered output.
    #[must_use]
    pub fn wall_secs(&self) -> f64 {
        self.wall_time.as_secs_f64()
    }
}

impl Add for DurationPair {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            processor_time: self.processor_time.checked_add(rhs.processor_time).expect(
                "processor time accumulation overflows Duration - this indicates an unrealistic scenario",
            ),
            wall_time: self.wall_time.checked_add(rhs.wall_time).expect(
                "wall time accumulation overflows Duration - this indicates an unrealistic scenario",
            ),
        }
    }
}

impl AddAssign for DurationPair {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for DurationPair {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
