use thiserror::Error;

/// Failures of the algebra layer.
///
/// Both variants replace what would otherwise be a silent NaN/Infinity
/// flowing into the rest of the pipeline.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a zero-length or non-finite vector")]
    ZeroLength,

    #[error("matrix is singular (determinant {determinant})")]
    Singular { determinant: f64 },
}

pub type MathResult<T> = Result<T, MathError>;
