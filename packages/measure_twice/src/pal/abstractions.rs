//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides the time sources a measurement is taken from.
///
/// Both readings are cumulative: callers take two readings and subtract.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Cumulative processor time consumed by the current process (all threads).
    fn processor_time(&self) -> Duration;

    /// Wall-clock time elapsed since an arbitrary but fixed origin.
    ///
    /// Never decreases for the lifetime of the platform instance.
    fn wall_time(&self) -> Duration;
}
