//! Real platform implementation using the operating system clocks.

use std::time::{Duration, Instant};

use cpu_time::ProcessTime;

use crate::pal::abstractions::Platform;

/// Reads processor time via the `cpu_time` package and wall time via [`Instant`].
#[derive(Debug, Clone)]
pub(crate) struct RealPlatform {
    origin: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn processor_time(&self) -> Duration {
        ProcessTime::now().as_duration()
    }

    fn wall_time(&self) -> Duration {
        self.origin.elapsed()
    }
}
