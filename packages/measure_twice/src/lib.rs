#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Low-ceremony benchmarking for comparing alternative implementations of the same
//! operation.
//!
//! A block of code is run a number of times back to back and two things are measured:
//!
//! * **processor time** - CPU time consumed by the process while the block ran;
//! * **wall time** - real time that elapsed while the block ran.
//!
//! The two diverge when the block waits (on I/O, sleeps, locks) or when other threads of
//! the process are busy, which is why both are reported.
//!
//! The results are printed as a human-readable report. There is no statistical analysis,
//! no history and no parallel execution: this package is a development tool for quick
//! comparisons, not a benchmarking framework.
//!
//! # Single measurement
//!
//! ```
//! use measure_twice::{Benchmark, Config};
//!
//! # fn main() -> Result<(), measure_twice::Error> {
//! let mut benchmark = Benchmark::new(Config::default());
//!
//! let result = benchmark.measure().iterations(1000).once(|| {
//!     let mut sum = 0_u64;
//!     for i in 0..100 {
//!         sum = sum.wrapping_add(i);
//!     }
//!     sum
//! })?;
//!
//! println!("{:?} of processor time", result.processor_time());
//! # Ok(())
//! # }
//! ```
//!
//! # Comparing alternatives
//!
//! A session takes several labeled reports and prints them in the order they are taken,
//! followed by the total:
//!
//! ```
//! use measure_twice::{Benchmark, Config};
//!
//! # fn main() -> Result<(), measure_twice::Error> {
//! let mut benchmark = Benchmark::new(Config::default());
//!
//! benchmark.measure().iterations(1000).session(|x| {
//!     x.report().label("format!").run(|| format!("{}-{}", 1, 2))?;
//!     x.report().label("to_string").run(|| 1.to_string() + "-" + &2.to_string())?;
//!     x.report().label("one more time").iterations(10).run(|| format!("{}", 3))?;
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! # Output format
//!
//! Output is rendered from five templates held by [`Templates`]: header, label, report
//! body, footer and separator. A single measurement prints the header and the footer. A
//! session prints the header, then for each report its label line (if labeled) and body,
//! then the separator and the footer. The footer is right-justified to the configured
//! display width.
//!
//! Templates contain `printf`-style placeholders that are filled in order:
//!
//! * `%f` - seconds as fixed-point with six decimal places;
//! * `%s` - the value in its natural form (label text, or seconds in shortest form);
//! * `%%` - a literal `%`.
//!
//! The report body and footer receive processor time then wall time, the label template
//! receives the label text and the header and separator receive nothing. A template that
//! does not consume exactly its arguments fails with [`Error::Format`] when rendered.
//!
//! With the default templates a session prints:
//!
//! ```text
//! ---- BENCHMARK ----------------------------------------------------------------
//! format!:
//!   Process: 0.000120
//!   Real: 0.000121371 seconds
//! to_string:
//!   Process: 0.000160
//!   Real: 0.000158736 seconds
//! -------------------------------------------------------------------------------
//!                                           TOTAL: 0.000280 (0.000280107 seconds)
//! ```
//!
//! # Logging
//!
//! Measurements emit `tracing` events at debug and trace level. No subscriber is installed
//! by this package.

mod benchmark;
mod clock;
mod config;
mod duration_pair;
mod error;
mod format;
mod pal;
mod registry;
mod session;
mod timer;

pub use benchmark::{Benchmark, MeasureBuilder, measure_once, measure_session, time};
pub use config::{Config, DEFAULT_ITERATIONS, DEFAULT_WIDTH, Templates};
pub use duration_pair::DurationPair;
pub use error::Error;
pub(crate) use error::Result;
pub use registry::{Registry, ScriptInfo, register};
pub use session::{ReportBuilder, Session};
