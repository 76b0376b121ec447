//! Rendering of output lines from templates.
//!
//! Templates use `printf`-style positional placeholders:
//!
//! * `%f` - seconds as fixed-point with six decimal places.
//! * `%s` - the argument in its natural form (text as-is, seconds in shortest form).
//! * `%%` - a literal percent sign.
//!
//! Arguments are consumed left to right. A template must consume exactly the arguments
//! it is given; anything else is a [`Error::Format`] raised at render time.

use std::fmt::Write as _;
use std::io;

use crate::config::Templates;
use crate::{DurationPair, Error, Result};

/// A value substituted into a template placeholder.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Arg<'a> {
    Text(&'a str),
    Seconds(f64),
}

/// Renders a template, substituting `args` in order.
pub(crate) fn render(template: &str, args: &[Arg<'_>]) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars();

    let fail = |problem: String| Error::Format {
        template: template.to_string(),
        problem,
    };

    while let Some(c) = chars.next() {
        if c != '%' {
            output.push(c);
            continue;
        }

        let directive = chars
            .next()
            .ok_or_else(|| fail("dangling '%' at end of template".to_string()))?;

        if directive == '%' {
            output.push('%');
            continue;
        }

        if directive != 'f' && directive != 's' {
            return Err(fail(format!("unknown directive '%{directive}'")));
        }

        let arg = remaining.next().ok_or_else(|| {
            fail(format!(
                "template needs more than the {} argument(s) supplied",
                args.len()
            ))
        })?;

        let written = match (directive, arg) {
            ('f', Arg::Seconds(secs)) => write!(output, "{secs:.6}"),
            ('f', Arg::Text(text)) => {
                return Err(fail(format!(
                    "'%f' requires a number but was given text '{text}'"
                )));
            }
            (_, Arg::Seconds(secs)) => write!(output, "{secs}"),
            (_, Arg::Text(text)) => output.write_str(text),
        };

        written.expect("writing to a String cannot fail");
    }

    let unused = remaining.len();
    if unused != 0 {
        return Err(fail(format!(
            "template leaves {unused} of {} argument(s) unused",
            args.len()
        )));
    }

    Ok(output)
}

/// Renders each kind of output line from a set of templates.
#[derive(Debug)]
pub(crate) struct Formatter<'a> {
    templates: &'a Templates,
    width: usize,
}

impl<'a> Formatter<'a> {
    pub(crate) fn new(templates: &'a Templates, width: usize) -> Self {
        Self { templates, width }
    }

    pub(crate) fn header(&self) -> Result<String> {
        render(self.templates.header(), &[])
    }

    pub(crate) fn label(&self, label: &str) -> Result<String> {
        render(self.templates.label(), &[Arg::Text(label)])
    }

    pub(crate) fn report(&self, pair: &DurationPair) -> Result<String> {
        render(self.templates.report(), &times(pair))
    }

    pub(crate) fn separator(&self) -> Result<String> {
        render(self.templates.separator(), &[])
    }

    /// The footer is right-justified to the display width.
    pub(crate) fn footer(&self, pair: &DurationPair) -> Result<String> {
        let rendered = render(self.templates.footer(), &times(pair))?;
        let width = self.width;

        Ok(format!("{rendered:>width$}"))
    }
}

/// Writes one rendered line to the output sink.
pub(crate) fn write_line(output: &mut (impl io::Write + ?Sized), line: &str) -> Result<()> {
    writeln!(output, "{line}")?;
    Ok(())
}

fn times(pair: &DurationPair) -> [Arg<'static>; 2] {
    [
        Arg::Seconds(pair.processor_secs()),
        Arg::Seconds(pair.wall_secs()),
    ]
}
