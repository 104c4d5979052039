/// Error taxonomy for the hardened export paths
use thiserror::Error;

/// Failures the pipeline can reject up front. Geometric drops during
/// classification are not errors; they are counted and reported instead.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The working volume must have positive extent to inscribe a sphere.
    #[error("invalid cell size {0}: the root cell must have positive extent")]
    InvalidCellSize(f64),

    /// A coordinate no longer fits a signed 32-bit record field once scaled.
    #[error("coordinate {value} on axis {axis} exceeds the encodable range after scaling")]
    CoordinateRange { axis: char, value: f64 },
}
