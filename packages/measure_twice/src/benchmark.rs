use std::io::{self, Stdout, Write};
use std::num::NonZero;

use tracing::debug;

use crate::clock::Clock;
use crate::format::{Formatter, write_line};
use crate::pal::PlatformFacade;
use crate::timer::{Timer, checked_iterations};
use crate::{Config, DurationPair, Error, Result, Session};

/// Entry point for taking measurements and writing their reports.
///
/// Holds the [`Config`] and the output sink (standard output unless another writer is
/// supplied). Each call to [`measure()`](Self::measure) starts one measurement, which is
/// then run either as a single anonymous measurement ([`MeasureBuilder::once()`]) or as
/// a session of labeled reports ([`MeasureBuilder::session()`]).
///
/// # Examples
///
/// ```
/// use measure_twice::{Benchmark, Config};
///
/// # fn main() -> Result<(), measure_twice::Error> {
/// let mut benchmark = Benchmark::new(Config::default());
///
/// let result = benchmark.measure().iterations(100).once(|| 1 + 1)?;
/// println!("processor time: {:?}", result.processor_time());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Benchmark<W = Stdout> {
    config: Config,
    output: W,
    timer: Timer,
}

impl Benchmark<Stdout> {
    /// Creates a benchmark that writes its reports to standard output.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl<W: Write> Benchmark<W> {
    /// Creates a benchmark that writes its reports to `output`.
    #[must_use]
    pub fn with_output(config: Config, output: W) -> Self {
        Self::with_platform(config, output, PlatformFacade::real())
    }

    pub(crate) fn with_platform(config: Config, output: W, platform: PlatformFacade) -> Self {
        Self {
            config,
            output,
            timer: Timer::new(Clock::new(platform)),
        }
    }

    /// Starts describing a measurement. Nothing happens until it is run.
    ///
    /// The measurement uses the configured default iteration count unless
    /// [`MeasureBuilder::iterations()`] overrides it.
    pub fn measure(&mut self) -> MeasureBuilder<'_, W> {
        MeasureBuilder {
            benchmark: self,
            iterations: None,
        }
    }

    /// Runs `block` `iterations` times and returns the elapsed times without printing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterationCount`] if `iterations` is zero.
    pub fn time<T>(&self, iterations: u64, mut block: impl FnMut() -> T) -> Result<DurationPair> {
        self.try_time(iterations, move || Ok::<_, Error>(block()))
    }

    /// Like [`time()`](Self::time) but for a block that can fail.
    ///
    /// # Errors
    ///
    /// Returns the first error from `block`, or [`Error::InvalidIterationCount`]
    /// converted into `E` if `iterations` is zero.
    pub fn try_time<T, E>(
        &self,
        iterations: u64,
        block: impl FnMut() -> std::result::Result<T, E>,
    ) -> std::result::Result<DurationPair, E>
    where
        E: From<Error>,
    {
        let iterations = checked_iterations(iterations)?;
        self.timer.measure(iterations, block)
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration. Changes apply to measurements started
    /// afterward.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The output sink.
    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the benchmark, returning the output sink.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Builder for a single measurement started by [`Benchmark::measure()`].
#[derive(Debug)]
#[must_use = "A measurement is only taken when the builder is run"]
pub struct MeasureBuilder<'b, W> {
    benchmark: &'b mut Benchmark<W>,
    iterations: Option<u64>,
}

impl<W: Write> MeasureBuilder<'_, W> {
    /// Overrides the configured default iteration count for this measurement.
    ///
    /// In session mode this becomes the default for every report in the session.
    /// Zero is rejected with [`Error::InvalidIterationCount`] when the measurement is run.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Measures `block` as a single anonymous measurement.
    ///
    /// Prints the header, runs the block the configured number of times and prints the
    /// footer with the result. Returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterationCount`] for zero iterations (before anything is
    /// printed), [`Error::Format`] for a template that cannot be rendered and
    /// [`Error::Output`] if writing fails.
    pub fn once<T>(self, mut block: impl FnMut() -> T) -> Result<DurationPair> {
        self.try_once(move || Ok::<_, Error>(block()))
    }

    /// Like [`once()`](Self::once) but for a block that can fail.
    ///
    /// The first error returned by `block` aborts the measurement and is returned as-is.
    /// The footer is not printed in that case.
    ///
    /// # Errors
    ///
    /// Returns the error from `block`, otherwise the same errors as
    /// [`once()`](Self::once), converted into `E`.
    pub fn try_once<T, E>(
        self,
        block: impl FnMut() -> std::result::Result<T, E>,
    ) -> std::result::Result<DurationPair, E>
    where
        E: From<Error>,
    {
        let iterations = self.resolve_iterations()?;
        let Benchmark {
            config,
            output,
            timer,
        } = self.benchmark;
        let formatter = Formatter::new(config.templates(), config.width());

        debug!(iterations = iterations.get(), "starting single measurement");

        write_line(output, &formatter.header()?)?;

        let pair = timer.measure(iterations, block)?;

        write_line(output, &formatter.footer(&pair)?)?;

        debug!(?pair, "finished single measurement");

        Ok(pair)
    }

    /// Measures a session of labeled reports.
    ///
    /// Prints the header, then calls `f` exactly once with a [`Session`] through which it
    /// takes any number of reports. After `f` returns, prints the separator and a footer
    /// with the session total. Returns the session total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterationCount`] for zero iterations (before anything is
    /// printed), any error returned by `f`, [`Error::Format`] for a template that cannot
    /// be rendered and [`Error::Output`] if writing fails.
    pub fn session(self, f: impl FnOnce(&mut Session<'_>) -> Result<()>) -> Result<DurationPair> {
        self.try_session(f)
    }

    /// Like [`session()`](Self::session) but with a caller-chosen error type.
    ///
    /// # Errors
    ///
    /// Same as [`session()`](Self::session), with crate errors converted into `E`.
    pub fn try_session<E>(
        self,
        f: impl FnOnce(&mut Session<'_>) -> std::result::Result<(), E>,
    ) -> std::result::Result<DurationPair, E>
    where
        E: From<Error>,
    {
        let iterations = self.resolve_iterations()?;
        let Benchmark {
            config,
            output,
            timer,
        } = self.benchmark;
        let formatter = Formatter::new(config.templates(), config.width());

        debug!(iterations = iterations.get(), "starting session");

        write_line(output, &formatter.header()?)?;

        let total = {
            let mut session = Session::new(
                &mut *output,
                Formatter::new(config.templates(), config.width()),
                timer,
                iterations,
            );

            f(&mut session)?;

            session.total()
        };

        write_line(output, &formatter.separator()?)?;
        write_line(output, &formatter.footer(&total)?)?;

        debug!(?total, "finished session");

        Ok(total)
    }

    fn resolve_iterations(&self) -> Result<NonZero<u64>> {
        match self.iterations {
            Some(iterations) => checked_iterations(iterations),
            None => Ok(self.benchmark.config.default_iterations()),
        }
    }
}

/// Measures `block` once with the default configuration, reporting to standard output.
///
/// Shorthand for `Benchmark::new(Config::default()).measure().once(block)`.
///
/// # Errors
///
/// See [`MeasureBuilder::once()`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), measure_twice::Error> {
/// let result = measure_twice::measure_once(|| "abc".repeat(3))?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
pub fn measure_once<T>(block: impl FnMut() -> T) -> Result<DurationPair> {
    Benchmark::new(Config::default()).measure().once(block)
}

/// Measures a session of reports with the default configuration, reporting to standard
/// output.
///
/// Shorthand for `Benchmark::new(Config::default()).measure().session(f)`.
///
/// # Errors
///
/// See [`MeasureBuilder::session()`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), measure_twice::Error> {
/// measure_twice::measure_session(|x| {
///     x.report().label("vec").iterations(100).run(|| vec![0_u8; 64])?;
///     x.report().label("array").iterations(100).run(|| [0_u8; 64])?;
///     Ok(())
/// })?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
pub fn measure_session(f: impl FnOnce(&mut Session<'_>) -> Result<()>) -> Result<DurationPair> {
    Benchmark::new(Config::default()).measure().session(f)
}

/// Runs `block` `iterations` times and returns the elapsed times without printing
/// anything.
///
/// # Errors
///
/// Returns [`Error::InvalidIterationCount`] if `iterations` is zero.
pub fn time<T>(iterations: u64, block: impl FnMut() -> T) -> Result<DurationPair> {
    Benchmark::new(Config::default()).time(iterations, block)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use new_zealand::nz;
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::Templates;
    use crate::pal::FakePlatform;

    assert_impl_all!(Benchmark<Vec<u8>>: Send, Sync);

    fn create_test_benchmark(config: Config) -> (Benchmark<Vec<u8>>, FakePlatform) {
        let platform = FakePlatform::new();
        let benchmark =
            Benchmark::with_platform(config, Vec::new(), PlatformFacade::fake(platform.clone()));
        (benchmark, platform)
    }

    fn output_of(benchmark: Benchmark<Vec<u8>>) -> String {
        String::from_utf8(benchmark.into_output()).unwrap()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn short_config() -> Config {
        Config::new().with_width(30).with_templates(
            Templates::for_width(30)
                .with_header("== BENCH ==")
                .with_separator("--"),
        )
    }

    #[test]
    fn once_prints_header_and_footer_only() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());

        let pair = benchmark.measure().iterations(100).once(|| 1 + 1).unwrap();

        assert_eq!(pair, DurationPair::ZERO);
        assert_eq!(
            output_of(benchmark),
            "== BENCH ==\n   TOTAL: 0.000000 (0 seconds)\n"
        );
    }

    #[test]
    fn once_footer_matches_returned_pair() {
        let (mut benchmark, platform) = create_test_benchmark(short_config());

        let pair = benchmark
            .measure()
            .iterations(4)
            .once(|| platform.advance(ms(250), ms(500)))
            .unwrap();

        assert_eq!(pair, DurationPair::new(ms(1000), ms(2000)));
        assert_eq!(
            output_of(benchmark),
            "== BENCH ==\n   TOTAL: 1.000000 (2 seconds)\n"
        );
    }

    #[test]
    fn once_uses_configured_default_iterations() {
        let config = short_config().with_default_iterations(nz!(12));
        let (mut benchmark, _platform) = create_test_benchmark(config);
        let calls = Cell::new(0_u64);

        benchmark
            .measure()
            .once(|| calls.set(calls.get().wrapping_add(1)))
            .unwrap();

        assert_eq!(calls.get(), 12);
    }

    #[test]
    fn zero_iterations_produces_no_output() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());

        let once = benchmark.measure().iterations(0).once(|| ());
        assert!(matches!(
            once,
            Err(Error::InvalidIterationCount { iterations: 0 })
        ));

        let session = benchmark.measure().iterations(0).session(|_| Ok(()));
        assert!(matches!(
            session,
            Err(Error::InvalidIterationCount { iterations: 0 })
        ));

        assert_eq!(output_of(benchmark), "");
    }

    #[test]
    fn session_prints_everything_in_order() {
        let (mut benchmark, platform) = create_test_benchmark(short_config());

        let total = benchmark
            .measure()
            .iterations(10)
            .session(|x| {
                x.report()
                    .label("fast")
                    .run(|| platform.advance(ms(1), ms(1)))?;
                x.report()
                    .label("slow")
                    .iterations(5)
                    .run(|| platform.advance(ms(100), ms(200)))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(total, DurationPair::new(ms(510), ms(1010)));
        assert_eq!(
            output_of(benchmark),
            "== BENCH ==\n\
             fast:\n  Process: 0.010000\n  Real: 0.01 seconds\n\
             slow:\n  Process: 0.500000\n  Real: 1 seconds\n\
             --\n\
             TOTAL: 0.510000 (1.01 seconds)\n"
        );
    }

    #[test]
    fn empty_session_reports_zero_total() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());

        let total = benchmark.measure().session(|_| Ok(())).unwrap();

        assert_eq!(total, DurationPair::ZERO);
        assert_eq!(
            output_of(benchmark),
            "== BENCH ==\n--\n   TOTAL: 0.000000 (0 seconds)\n"
        );
    }

    #[test]
    fn session_closure_runs_once() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());
        let mut runs = 0_u32;

        benchmark
            .measure()
            .session(|_| {
                runs = runs.wrapping_add(1);
                Ok(())
            })
            .unwrap();

        assert_eq!(runs, 1);
    }

    #[test]
    fn session_default_iterations_come_from_measurement() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());

        benchmark
            .measure()
            .iterations(33)
            .session(|x| {
                assert_eq!(x.default_iterations().get(), 33);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn session_error_skips_footer() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());

        let result = benchmark.measure().iterations(1).session(|x| {
            x.report().label("first").run(|| ())?;
            x.report().iterations(0).run(|| ())?;
            Ok(())
        });

        assert!(matches!(
            result,
            Err(Error::InvalidIterationCount { iterations: 0 })
        ));
        assert_eq!(
            output_of(benchmark),
            "== BENCH ==\nfirst:\n  Process: 0.000000\n  Real: 0 seconds\n"
        );
    }

    #[test]
    fn try_once_propagates_block_error() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());
        let calls = Cell::new(0_u32);

        let result = benchmark.measure().iterations(10).try_once(|| {
            calls.set(calls.get().wrapping_add(1));
            Err::<(), _>(Failure::Block)
        });

        assert!(matches!(result, Err(Failure::Block)));
        assert_eq!(calls.get(), 1);
        assert_eq!(output_of(benchmark), "== BENCH ==\n");
    }

    #[test]
    fn try_session_with_custom_error() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());

        let result = benchmark
            .measure()
            .try_session(|_| Err::<(), _>(Failure::Block));

        assert!(matches!(result, Err(Failure::Block)));
    }

    #[test]
    fn try_session_converts_crate_errors() {
        let (mut benchmark, _platform) = create_test_benchmark(short_config());

        let result = benchmark
            .measure()
            .iterations(0)
            .try_session(|_| Ok::<(), Failure>(()));

        assert!(matches!(
            result,
            Err(Failure::Measure(Error::InvalidIterationCount { .. }))
        ));
    }

    #[test]
    fn malformed_footer_is_format_error() {
        let config = short_config()
            .with_templates(Templates::for_width(30).with_footer("TOTAL: %f"));
        let (mut benchmark, _platform) = create_test_benchmark(config);

        let result = benchmark.measure().iterations(1).once(|| ());

        assert!(matches!(result, Err(Error::Format { .. })));
    }

    #[test]
    fn config_change_applies_only_afterward() {
        let config = short_config().with_default_iterations(nz!(2));
        let (mut benchmark, _platform) = create_test_benchmark(config);
        let calls = Cell::new(0_u64);

        benchmark
            .measure()
            .once(|| calls.set(calls.get().wrapping_add(1)))
            .unwrap();
        assert_eq!(calls.get(), 2);

        benchmark.config_mut().set_default_iterations(nz!(5));

        benchmark
            .measure()
            .once(|| calls.set(calls.get().wrapping_add(1)))
            .unwrap();
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn time_prints_nothing() {
        let (benchmark, platform) = create_test_benchmark(short_config());

        let pair = benchmark
            .time(3, || platform.advance(ms(1), ms(2)))
            .unwrap();

        assert_eq!(pair, DurationPair::new(ms(3), ms(6)));
        assert_eq!(output_of(benchmark), "");
    }

    #[test]
    fn time_rejects_zero_iterations() {
        let (benchmark, _platform) = create_test_benchmark(short_config());

        assert!(matches!(
            benchmark.time(0, || ()),
            Err(Error::InvalidIterationCount { iterations: 0 })
        ));
    }

    /// Sink that accepts a fixed number of bytes and fails every write after that.
    #[derive(Debug)]
    struct ClosingSink {
        remaining: usize,
        accepted: Vec<u8>,
    }

    impl ClosingSink {
        fn accepting(bytes: usize) -> Self {
            Self {
                remaining: bytes,
                accepted: Vec::new(),
            }
        }
    }

    impl Write for ClosingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.remaining {
                return Err(io::Error::other("closed"));
            }

            self.remaining = self.remaining.saturating_sub(buf.len());
            self.accepted.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn closing_benchmark(accept_bytes: usize) -> Benchmark<ClosingSink> {
        Benchmark::with_platform(
            short_config(),
            ClosingSink::accepting(accept_bytes),
            PlatformFacade::fake(FakePlatform::new()),
        )
    }

    #[test]
    fn once_with_failing_output_never_runs_block() {
        let mut benchmark = closing_benchmark(0);
        let calls = Cell::new(0_u64);

        let result = benchmark
            .measure()
            .iterations(3)
            .once(|| calls.set(calls.get().wrapping_add(1)));

        assert!(matches!(result, Err(Error::Output(_))));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn session_label_write_failure_skips_report() {
        // Room for the header line only.
        let mut benchmark = closing_benchmark("== BENCH ==\n".len());
        let calls = Cell::new(0_u64);
        let mut total_after_failure = None;

        let result = benchmark.measure().iterations(3).session(|x| {
            let report = x
                .report()
                .label("rep")
                .run(|| calls.set(calls.get().wrapping_add(1)));
            total_after_failure = Some(x.total());
            report?;
            Ok(())
        });

        assert!(matches!(result, Err(Error::Output(_))));
        assert_eq!(calls.get(), 0);
        assert_eq!(total_after_failure, Some(DurationPair::ZERO));
        assert_eq!(benchmark.into_output().accepted, b"== BENCH ==\n");
    }

    #[test]
    fn session_body_write_failure_is_output_error() {
        // Room for the header and label lines, not for the report body.
        let mut benchmark = closing_benchmark("== BENCH ==\nrep:\n".len());
        let mut total_after_failure = None;

        let result = benchmark.measure().iterations(1).session(|x| {
            let report = x.report().label("rep").run(|| ());
            total_after_failure = Some(x.total());
            report?;
            Ok(())
        });

        assert!(matches!(result, Err(Error::Output(_))));
        assert_eq!(total_after_failure, Some(DurationPair::ZERO));
        assert_eq!(benchmark.into_output().accepted, b"== BENCH ==\nrep:\n");
    }

    #[derive(Debug)]
    enum Failure {
        Block,
        Measure(Error),
    }

    impl From<Error> for Failure {
        fn from(error: Error) -> Self {
            Self::Measure(error)
        }
    }
}
