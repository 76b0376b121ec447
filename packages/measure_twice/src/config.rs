//! Configuration shared by all measurements taken through a [`Benchmark`](crate::Benchmark).

use std::num::NonZero;

use new_zealand::nz;

/// Number of iterations used when a measurement does not specify its own.
pub const DEFAULT_ITERATIONS: NonZero<u64> = nz!(10_000);

/// Display width, in characters, the footer is right-justified to.
pub const DEFAULT_WIDTH: usize = 79;

const HEADER_TITLE: &str = "---- BENCHMARK ";

/// Configures how measurements are taken and reported.
///
/// Set up once, then handed to a [`Benchmark`](crate::Benchmark). The benchmark can
/// adjust it between measurements via
/// [`config_mut()`](crate::Benchmark::config_mut); a measurement always uses the
/// configuration as it was when that measurement started.
///
/// # Examples
///
/// ```
/// use measure_twice::{Config, Templates};
/// use new_zealand::nz;
///
/// let config = Config::new()
///     .with_default_iterations(nz!(500))
///     .with_templates(Templates::default().with_label(">> %s"));
///
/// assert_eq!(config.default_iterations().get(), 500);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    default_iterations: NonZero<u64>,
    width: usize,
    templates: Templates,
}

impl Config {
    /// Creates a configuration with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_iterations: DEFAULT_ITERATIONS,
            width: DEFAULT_WIDTH,
            templates: Templates::default(),
        }
    }

    /// Sets the iteration count used by measurements that do not specify one.
    #[must_use]
    pub fn with_default_iterations(mut self, iterations: NonZero<u64>) -> Self {
        self.default_iterations = iterations;
        self
    }

    /// Sets the display width the footer is right-justified to.
    ///
    /// This does not regenerate the header and separator templates. Use
    /// [`Templates::for_width()`] for templates that match a non-default width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Replaces all output templates.
    #[must_use]
    pub fn with_templates(mut self, templates: Templates) -> Self {
        self.templates = templates;
        self
    }

    /// Sets the iteration count used by measurements that do not specify one.
    pub fn set_default_iterations(&mut self, iterations: NonZero<u64>) {
        self.default_iterations = iterations;
    }

    /// Sets the display width the footer is right-justified to.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Mutable access to the output templates, for overriding them one at a time.
    pub fn templates_mut(&mut self) -> &mut Templates {
        &mut self.templates
    }

    /// Iteration count used by measurements that do not specify one.
    #[must_use]
    pub fn default_iterations(&self) -> NonZero<u64> {
        self.default_iterations
    }

    /// Display width the footer is right-justified to.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The output templates.
    #[must_use]
    pub fn templates(&self) -> &Templates {
        &self.templates
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// The five output templates, see the [`format`](crate#output-format) rules.
///
/// | Template    | Arguments                    |
/// |-------------|------------------------------|
/// | `header`    | none                         |
/// | `label`     | label text                   |
/// | `report`    | processor time, wall time    |
/// | `footer`    | processor time, wall time    |
/// | `separator` | none                         |
///
/// Templates are not validated until they are rendered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Templates {
    header: String,
    label: String,
    report: String,
    footer: String,
    separator: String,
}

impl Templates {
    /// Default templates with the header and separator sized to `width` characters.
    #[must_use]
    pub fn for_width(width: usize) -> Self {
        let header_dashes = width.saturating_sub(HEADER_TITLE.len());

        Self {
            header: format!("{HEADER_TITLE}{}", "-".repeat(header_dashes)),
            label: "%s:".to_string(),
            report: "  Process: %f\n  Real: %s seconds".to_string(),
            footer: "TOTAL: %f (%s seconds)".to_string(),
            separator: "-".repeat(width),
        }
    }

    /// Replaces the header template.
    #[must_use]
    pub fn with_header(mut self, template: impl Into<String>) -> Self {
        self.header = template.into();
        self
    }

    /// Replaces the label template.
    #[must_use]
    pub fn with_label(mut self, template: impl Into<String>) -> Self {
        self.label = template.into();
        self
    }

    /// Replaces the per-report body template.
    #[must_use]
    pub fn with_report(mut self, template: impl Into<String>) -> Self {
        self.report = template.into();
        self
    }

    /// Replaces the footer template.
    #[must_use]
    pub fn with_footer(mut self, template: impl Into<String>) -> Self {
        self.footer = template.into();
        self
    }

    /// Replaces the separator template.
    #[must_use]
    pub fn with_separator(mut self, template: impl Into<String>) -> Self {
        self.separator = template.into();
        self
    }

    /// Replaces the header template in place.
    pub fn set_header(&mut self, template: impl Into<String>) {
        self.header = template.into();
    }

    /// Replaces the label template in place.
    pub fn set_label(&mut self, template: impl Into<String>) {
        self.label = template.into();
    }

    /// Replaces the per-report body template in place.
    pub fn set_report(&mut self, template: impl Into<String>) {
        self.report = template.into();
    }

    /// Replaces the footer template in place.
    pub fn set_footer(&mut self, template: impl Into<String>) {
        self.footer = template.into();
    }

    /// Replaces the separator template in place.
    pub fn set_separator(&mut self, template: impl Into<String>) {
        self.separator = template.into();
    }

    /// The header template.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The label template.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The per-report body template.
    #[must_use]
    pub fn report(&self) -> &str {
        &self.report
    }

    /// The footer template.
    #[must_use]
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// The separator template.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::for_width(DEFAULT_WIDTH)
    }
}
