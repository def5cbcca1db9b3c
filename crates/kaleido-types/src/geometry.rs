// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Ring Geometry Constants
// ─────────────────────────────────────────────────────────────────────
//! Derived constants of the ring: edge length s, rung length h = s/√2,
//! the angular step α = 2π/n, and the reference axis n_α used by the
//! basis frame construction. Computed once per instance, never mutated.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{KaleidoError, KaleidoResult};

/// The four user-tunable shape parameters, one per rest vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeParam {
    /// Controls vertex A.
    Lambda,
    /// Controls vertex B.
    Mu,
    /// Controls vertex C.
    Kappa,
    /// Controls vertex D.
    Nu,
}

impl ShapeParam {
    /// Index of the controlled vertex in the rest pose (A, B, C, D).
    pub fn vertex_index(self) -> usize {
        match self {
            ShapeParam::Lambda => 0,
            ShapeParam::Mu => 1,
            ShapeParam::Kappa => 2,
            ShapeParam::Nu => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeParam::Lambda => "lambda",
            ShapeParam::Mu => "mu",
            ShapeParam::Kappa => "kappa",
            ShapeParam::Nu => "nu",
        }
    }

    pub const ALL: [ShapeParam; 4] = [
        ShapeParam::Lambda,
        ShapeParam::Mu,
        ShapeParam::Kappa,
        ShapeParam::Nu,
    ];
}

/// Immutable geometric constants of an n-cell ring with edge length s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingGeometry {
    /// Edge length of the generating tetrahedron.
    pub s: f64,
    /// Rung length h = s/√2 (the hinge edge separation).
    pub h: f64,
    /// Cell count.
    pub n: usize,
    /// Angular step α = 2π/n between adjacent cells.
    pub alpha: f64,
}

impl RingGeometry {
    pub fn new(s: f64, n: usize) -> KaleidoResult<Self> {
        if n < 3 {
            return Err(KaleidoError::UnsupportedCellCount { n });
        }
        if !(s.is_finite() && s > 0.0) {
            return Err(KaleidoError::Numerical(format!(
                "edge length must be finite and > 0, got {s}"
            )));
        }
        let alpha = std::f64::consts::TAU / n as f64;
        Ok(Self {
            s,
            h: s / std::f64::consts::SQRT_2,
            n,
            alpha,
        })
    }

    /// cot(α) computed as cos/sin, finite for all α ∈ (0, π).
    ///
    /// At α = π/2 (n = 4) this lands on ~1e-17, where the naive
    /// `1.0 / tan(alpha)` path would divide by a near-overflow tangent.
    pub fn cot_alpha(&self) -> f64 {
        self.alpha.cos() / self.alpha.sin()
    }

    /// The constant reference axis n_α = (−sin α, cos α, 0).
    pub fn n_alpha(&self) -> Vector3<f64> {
        Vector3::new(-self.alpha.sin(), self.alpha.cos(), 0.0)
    }

    /// Direction of the reflection axis y = x·tan(α) in the XY plane.
    pub fn reflection_axis(&self) -> Vector3<f64> {
        Vector3::new(self.alpha.cos(), self.alpha.sin(), 0.0)
    }

    /// Derived upper bound for every shape parameter: h·cot(α),
    /// clamped to 0 when negative (α > π/2, i.e. n = 3).
    pub fn param_max(&self) -> f64 {
        (self.h * self.cot_alpha()).max(0.0)
    }

    /// Default shape parameter value.
    ///
    /// s/2 gives the regular tetrahedron; for n = 6 that exceeds
    /// `param_max`, so the ring defaults to the flattened maximum —
    /// no regular closed kaleidocycle of six cells exists.
    pub fn param_default(&self) -> f64 {
        if self.n == 6 {
            self.param_max()
        } else {
            self.s / 2.0
        }
    }
}
