use std::path::PathBuf;

/// Errors raised by the sieve/statistics/gain pipeline.
///
/// Arithmetic degeneracies (zero-variance bits, infinite ratios) are data and
/// never show up here; only structurally invalid requests do.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("cannot compute bit statistics of an empty number set")]
    EmptyInput,

    #[error("bit width {0} is out of range")]
    BitWidthOutOfRange(u32),

    #[error("correlation matrices differ in width ({0} vs {1})")]
    WidthMismatch(usize, usize),

    #[error("no correlation cells survived filtering")]
    NoRetainedCells,
}

/// Errors raised while turning samples into plots.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("no finite points to report")]
    NoPoints,

    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
