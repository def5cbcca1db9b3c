// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Basis Frame Calculator
// ─────────────────────────────────────────────────────────────────────
//! Time-varying orthonormal triad (u, v, w):
//!
//!   u(t) = normalize(cos t, 0, sin t)
//!   v(t) = normalize(u(t) × n_α)
//!   w(t) = normalize(−(u(t) × v(t)))
//!
//! The triad degenerates where u(t) is parallel to n_α (the cross
//! product vanishes); that case is reported as `DegenerateFrame`
//! rather than normalising a zero vector into NaN.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use kaleido_types::{KaleidoError, KaleidoResult, RingGeometry};

/// Orthonormal basis frame for one phase value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasisFrame {
    pub u: Vector3<f64>,
    pub v: Vector3<f64>,
    pub w: Vector3<f64>,
}

impl BasisFrame {
    /// Compute the frame at phase `time` (radians).
    ///
    /// `tolerance` is the cross-product norm below which u ∥ n_α is
    /// declared. Only n = 4 at t ≡ 0 (mod π) can reach it in exact
    /// arithmetic.
    pub fn at(time: f64, geo: &RingGeometry, tolerance: f64) -> KaleidoResult<Self> {
        if !time.is_finite() {
            return Err(KaleidoError::Numerical(format!(
                "phase must be finite, got {time}"
            )));
        }

        let u = Vector3::new(time.cos(), 0.0, time.sin()).normalize();

        let cross = u.cross(&geo.n_alpha());
        let norm = cross.norm();
        if norm < tolerance {
            return Err(KaleidoError::DegenerateFrame { time });
        }
        let v = cross / norm;

        let w = (-u.cross(&v)).normalize();

        Ok(Self { u, v, w })
    }

    /// Maximum deviation from orthonormality: worst unit-norm error and
    /// pairwise dot product magnitude.
    pub fn orthonormality_error(&self) -> f64 {
        let mut err: f64 = 0.0;
        for a in [&self.u, &self.v, &self.w] {
            err = err.max((a.norm() - 1.0).abs());
        }
        err = err.max(self.u.dot(&self.v).abs());
        err = err.max(self.u.dot(&self.w).abs());
        err = err.max(self.v.dot(&self.w).abs());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn geo(n: usize) -> RingGeometry {
        RingGeometry::new(1.0, n).unwrap()
    }

    #[test]
    fn test_orthonormal_over_sampled_phases() {
        // 1000 samples over [0, 4π] for n ∈ {3..12}
        for n in 3..=12 {
            let geo = geo(n);
            for k in 0..1000 {
                let t = 4.0 * std::f64::consts::PI * k as f64 / 999.0;
                let frame = match BasisFrame::at(t, &geo, TOL) {
                    Ok(f) => f,
                    // n = 4 hits the structural degeneracy at t ≡ 0 (mod π)
                    Err(KaleidoError::DegenerateFrame { .. }) if n == 4 => continue,
                    Err(e) => panic!("unexpected error at n={n} t={t}: {e}"),
                };
                let err = frame.orthonormality_error();
                assert!(err < 1e-9, "orthonormality error {err} at n={n} t={t}");
            }
        }
    }

    #[test]
    fn test_periodicity() {
        let geo = geo(8);
        for k in 0..100 {
            let t = 0.01 + std::f64::consts::TAU * k as f64 / 100.0;
            let a = BasisFrame::at(t, &geo, TOL).unwrap();
            let b = BasisFrame::at(t + std::f64::consts::TAU, &geo, TOL).unwrap();
            assert!((a.u - b.u).norm() < 1e-9, "u not 2π-periodic at t={t}");
            assert!((a.v - b.v).norm() < 1e-9, "v not 2π-periodic at t={t}");
            assert!((a.w - b.w).norm() < 1e-9, "w not 2π-periodic at t={t}");
        }
    }

    #[test]
    fn test_concrete_n8_t0() {
        // n=8, s=1, t=0: u=(1,0,0), n_α=(−sin π/4, cos π/4, 0),
        // v = normalize(u × n_α) = (0,0,1), w = −(u×v) = (0,1,0)
        let geo = geo(8);
        let frame = BasisFrame::at(0.0, &geo, TOL).unwrap();
        assert!((frame.u - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-9);
        assert!((frame.v - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-9);
        assert!((frame.w - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-9);
        let na = geo.n_alpha();
        assert!((na.x + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!((na.y - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_frame_n4() {
        // n=4: n_α = (−1, 0, 0) and u(0) = (1, 0, 0) are parallel
        let geo = geo(4);
        assert!(matches!(
            BasisFrame::at(0.0, &geo, TOL),
            Err(KaleidoError::DegenerateFrame { .. })
        ));
        assert!(matches!(
            BasisFrame::at(std::f64::consts::PI, &geo, TOL),
            Err(KaleidoError::DegenerateFrame { .. })
        ));
        // Away from the singularity the frame is fine
        assert!(BasisFrame::at(0.5, &geo, TOL).is_ok());
    }

    #[test]
    fn test_non_finite_phase_rejected() {
        let geo = geo(8);
        assert!(BasisFrame::at(f64::NAN, &geo, TOL).is_err());
        assert!(BasisFrame::at(f64::INFINITY, &geo, TOL).is_err());
    }

    #[test]
    fn test_right_handedness() {
        // det[u w v] = u · (w × v) must be +1: the composer's column
        // order (u, w, v) has to stay a proper rotation.
        let geo = geo(8);
        for k in 0..50 {
            let t = 0.05 + 0.13 * k as f64;
            let f = BasisFrame::at(t, &geo, TOL).unwrap();
            let det = f.u.dot(&f.w.cross(&f.v));
            assert!((det - 1.0).abs() < 1e-9, "det={det} at t={t}");
        }
    }
}
