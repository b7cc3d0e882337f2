use thiserror::Error;

/// Top-level error type for the Camber curve toolkit.
#[derive(Debug, Error)]
pub enum CamberError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to curve operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("curves have mismatched point counts: {left} vs {right}")]
    MismatchedPointCount { left: usize, right: usize },
}

/// Errors related to loft tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`CamberError`].
pub type Result<T> = std::result::Result<T, CamberError>;
