// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Kaleidocycle Kernel failures.
#[derive(Error, Debug)]
pub enum KaleidoError {
    /// Fewer than three cells cannot form a closed ring.
    #[error("unsupported cell count: n must be >= 3, got {n}")]
    UnsupportedCellCount { n: usize },

    /// Shape parameter outside its derived valid range.
    #[error("invalid shape parameter {param}: {value} outside [0, {max}]")]
    InvalidShapeParameter {
        param: &'static str,
        value: f64,
        max: f64,
    },

    /// u(t) parallel to the reference axis — the frame cross product
    /// degenerates to a zero vector.
    #[error("degenerate basis frame at t = {time}: u(t) parallel to n_alpha")]
    DegenerateFrame { time: f64 },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type KaleidoResult<T> = Result<T, KaleidoError>;
