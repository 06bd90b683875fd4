use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by the scoring core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Analysis needs at least one variable and at least one option.
    #[error("Insufficient data for analysis: {variables} variables, {options} options")]
    InsufficientData { variables: usize, options: usize },
}
