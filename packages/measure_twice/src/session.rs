use std::fmt;
use std::io::Write;
use std::num::NonZero;

use tracing::debug;

use crate::format::{Formatter, write_line};
use crate::timer::{Timer, checked_iterations};
use crate::{DurationPair, Error, Result};

/// A scope in which multiple labeled measurements are taken and accumulated.
///
/// A session is handed to the closure given to
/// [`MeasureBuilder::session()`](crate::MeasureBuilder::session). Each call to
/// [`report()`](Self::report) measures one block, prints its result immediately and adds
/// it to the session total. Reports are printed in the order they are run, which is what
/// tells alternatives apart in the output.
///
/// # Examples
///
/// ```
/// use measure_twice::{Benchmark, Config};
///
/// # fn main() -> Result<(), measure_twice::Error> {
/// let mut benchmark = Benchmark::with_output(Config::default(), Vec::new());
///
/// let total = benchmark.measure().iterations(100).session(|x| {
///     x.report().label("concat").run(|| format!("{}{}", "a", "b"))?;
///     x.report().label("push_str").iterations(50).run(|| {
///         let mut s = String::from("a");
///         s.push_str("b");
///         s
///     })?;
///     Ok(())
/// })?;
///
/// println!("both candidates together: {total:?}");
/// # Ok(())
/// # }
/// ```
pub struct Session<'a> {
    output: &'a mut dyn Write,
    formatter: Formatter<'a>,
    timer: &'a Timer,
    default_iterations: NonZero<u64>,
    total: DurationPair,
}

impl<'a> Session<'a> {
    pub(crate) fn new(
        output: &'a mut dyn Write,
        formatter: Formatter<'a>,
        timer: &'a Timer,
        default_iterations: NonZero<u64>,
    ) -> Self {
        Self {
            output,
            formatter,
            timer,
            default_iterations,
            total: DurationPair::ZERO,
        }
    }

    /// Starts describing a report. The report is taken when the builder is run.
    ///
    /// Without further configuration the report has no label and uses the session's
    /// default iteration count.
    pub fn report(&mut self) -> ReportBuilder<'_, 'a> {
        ReportBuilder {
            session: self,
            label: None,
            iterations: None,
        }
    }

    /// Sum of the results of all reports taken so far.
    #[must_use]
    pub fn total(&self) -> DurationPair {
        self.total
    }

    /// Iteration count used by reports that do not specify their own.
    #[must_use]
    pub fn default_iterations(&self) -> NonZero<u64> {
        self.default_iterations
    }

    fn emit(&mut self, line: &str) -> Result<()> {
        write_line(&mut *self.output, line)
    }
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("default_iterations", &self.default_iterations)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

/// Builder for a single report within a [`Session`].
#[derive(Debug)]
#[must_use = "A report is only taken when the builder is run"]
pub struct ReportBuilder<'s, 'a> {
    session: &'s mut Session<'a>,
    label: Option<String>,
    iterations: Option<u64>,
}

impl ReportBuilder<'_, '_> {
    /// Prints a label line before the report body.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overrides the session's default iteration count for this report only.
    ///
    /// Zero is rejected with [`Error::InvalidIterationCount`] when the report is run.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Runs `block` the configured number of times, prints the result and adds it to the
    /// session total.
    ///
    /// Returns the updated session total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterationCount`] if zero iterations were requested, in which
    /// case nothing is printed. Returns [`Error::Format`] if the label or report template
    /// cannot be rendered and [`Error::Output`] if writing fails.
    pub fn run<T>(self, mut block: impl FnMut() -> T) -> Result<DurationPair> {
        self.try_run(move || Ok::<_, Error>(block()))
    }

    /// Like [`run()`](Self::run) but for a block that can fail.
    ///
    /// The first error returned by `block` stops the report: remaining iterations are
    /// skipped, no report body is printed and the session total is left unchanged. The
    /// error is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the error from `block` if it fails, otherwise the same errors as
    /// [`run()`](Self::run), converted into `E`.
    pub fn try_run<T, E>(
        self,
        block: impl FnMut() -> std::result::Result<T, E>,
    ) -> std::result::Result<DurationPair, E>
    where
        E: From<Error>,
    {
        let Self {
            session,
            label,
            iterations,
        } = self;

        let iterations = match iterations {
            Some(iterations) => checked_iterations(iterations)?,
            None => session.default_iterations,
        };

        if let Some(label) = &label {
            let line = session.formatter.label(label)?;
            session.emit(&line)?;
        }

        debug!(?label, iterations = iterations.get(), "running report");

        let pair = session.timer.measure(iterations, block)?;

        let body = session.formatter.report(&pair)?;
        session.emit(&body)?;

        session.total += pair;

        Ok(session.total)
    }
}
