use thiserror::Error;

/// Errors that can occur when measuring or reporting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller asked for a measurement with zero iterations.
    ///
    /// Raised before any output is written or any timing begins.
    #[error("invalid iteration count {iterations}: at least one iteration is required")]
    InvalidIterationCount {
        /// The rejected iteration count.
        iterations: u64,
    },

    /// A format template could not be rendered with the arguments it was given.
    ///
    /// Templates are not validated when configured, only when rendered.
    #[error("cannot render format template '{template}': {problem}")]
    Format {
        /// The template that failed to render.
        template: String,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// Writing the rendered output failed.
    #[error("failed to write benchmark output")]
    Output(#[from] std::io::Error),
}

/// A specialized `Result` type for measurement operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
