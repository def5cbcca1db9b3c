// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Chain-Closure Translation Solver
// ─────────────────────────────────────────────────────────────────────
//! Closed-form offset M keeping the shared rung between adjacent cells
//! coincident as the frame rotates:
//!
//!   M = h · (w_y·cot(α) − w_x/2,  w_y/2,  0)
//!
//! Stateless: recomputed from w whenever the frame changes. The cot(α)
//! form keeps the n = 4 case (α = π/2) finite where 1/tan(α) would
//! pass through a near-overflow tangent.

use nalgebra::Vector3;

use kaleido_types::RingGeometry;

/// Solve the chain-closure constraint for the frame axis `w`.
pub fn chain_offset(w: &Vector3<f64>, geo: &RingGeometry) -> Vector3<f64> {
    let cot = geo.cot_alpha();
    Vector3::new(
        geo.h * (w.y * cot - w.x / 2.0),
        geo.h * (w.y / 2.0),
        0.0,
    )
}
