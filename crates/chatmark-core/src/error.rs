use thiserror::Error;

/// Failures a pipeline invocation can surface to the host.
///
/// Nothing here is fatal to the host process: a failed conversion simply
/// yields no output for that call and the message is displayed without the
/// enhancement.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RenderError {
    #[error("no valid markdown converter selected")]
    NoConverter,
}
