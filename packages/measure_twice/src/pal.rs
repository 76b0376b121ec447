//! Platform abstraction layer for reading the two clocks.
//!
//! Switches between the real time sources (the `cpu_time` package for processor time and
//! the standard library monotonic clock for wall time) and a fake implementation used
//! by tests to control time precisely.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
