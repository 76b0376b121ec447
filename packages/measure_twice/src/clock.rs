use std::time::Duration;

use crate::pal::{Platform, PlatformFacade};

/// Point-in-time reading of both time sources.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Sample {
    pub(crate) processor_time: Duration,
    pub(crate) wall_time: Duration,
}

impl Sample {
    /// Time elapsed between `earlier` and this sample, per time source.
    ///
    /// Saturates at zero in case a clock reads backwards.
    pub(crate) fn since(self, earlier: Self) -> (Duration, Duration) {
        (
            self.processor_time.saturating_sub(earlier.processor_time),
            self.wall_time.saturating_sub(earlier.wall_time),
        )
    }
}

/// Reads processor time and wall time together.
#[derive(Clone, Debug)]
pub(crate) struct Clock {
    platform: PlatformFacade,
}

impl Clock {
    pub(crate) fn new(platform: PlatformFacade) -> Self {
        Self { platform }
    }

    pub(crate) fn sample(&self) -> Sample {
        Sample {
            processor_time: self.platform.processor_time(),
            wall_time: self.platform.wall_time(),
        }
    }
}
