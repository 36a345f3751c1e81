use thiserror::Error;

// ---------------------------------------------------------------------------
// PipelineError – everything that can abort a load once rows are available
// ---------------------------------------------------------------------------

/// Fatal errors raised by the transformation pipeline.
///
/// None of these are recoverable inside the pipeline: a load either produces
/// a complete [`PipelineState`](super::pipeline::PipelineState) or nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A payload field could not be parsed as an integer.
    #[error("row {row}, field {field}: '{value}' is not an integer")]
    MalformedRow {
        row: usize,
        field: usize,
        value: String,
    },

    /// A region has no day values, so it cannot be ranked.
    #[error("region '{region}' has no values to rank by")]
    EmptySeries { region: String },

    /// A region's series length disagrees with the table's day count.
    #[error("region '{region}' has {actual} values, expected {expected}")]
    InconsistentSeriesLength {
        region: String,
        expected: usize,
        actual: usize,
    },
}
