//! Platform facade for switching between real and fake implementations.

use std::time::Duration;

use crate::pal::abstractions::Platform;
#[cfg(test)]
use crate::pal::fake::FakePlatform;
use crate::pal::real::RealPlatform;

/// Unified access to either the real platform or the fake one used in tests.
#[derive(Debug, Clone)]
pub(crate) enum PlatformFacade {
    Real(RealPlatform),

    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    /// Creates a facade over the real operating system clocks.
    pub(crate) fn real() -> Self {
        Self::Real(RealPlatform::new())
    }

    #[cfg(test)]
    pub(crate) fn fake(fake_platform: FakePlatform) -> Self {
        Self::Fake(fake_platform)
    }
}

impl Platform for PlatformFacade {
    fn processor_time(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.processor_time(),
            #[cfg(test)]
            Self::Fake(platform) => platform.processor_time(),
        }
    }

    fn wall_time(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.wall_time(),
            #[cfg(test)]
            Self::Fake(platform) => platform.wall_time(),
        }
    }
}
