// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Shape Parameter Controller
// ─────────────────────────────────────────────────────────────────────
//! Maps the four scalar parameters λ, μ, κ, ν onto the rest-pose
//! vertices, range-checked against the derived bound [0, h·cot(α)]:
//!
//!   λ → A = (−λ, −h/2, 0)
//!   μ → B = (μ,  −h/2, 0)        (Absolute) or (μ·λ, −h/2, 0)
//!   κ → C = (0,  h/2, −κ)
//!   ν → D = (0,  h/2,  ν)        (Absolute) or (0, h/2, ν·κ)
//!
//! Because the engine evaluates world geometry as rest × transform,
//! an edit is automatically consistent with the current phase — the
//! visible rotation is never reset by a slider move.

use serde::{Deserialize, Serialize};

use kaleido_types::{KaleidoError, KaleidoResult, ParamMapping, RingGeometry, ShapeParam};

use crate::mesh::CellMesh;

/// Current values of the four shape parameters plus the mapping policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeController {
    pub lambda: f64,
    pub mu: f64,
    pub kappa: f64,
    pub nu: f64,
    mapping: ParamMapping,
    max: f64,
}

impl ShapeController {
    /// Controller with per-n defaults: s/2 for n ≠ 6, the derived
    /// maximum for n = 6 (no regular six-cell ring exists).
    ///
    /// Defaults are taken as-is even where they exceed the edit range
    /// (n < 6); only explicit edits are range-checked.
    pub fn with_defaults(geo: &RingGeometry, mapping: ParamMapping) -> Self {
        let d = geo.param_default();
        Self {
            lambda: d,
            mu: d,
            kappa: d,
            nu: d,
            mapping,
            max: geo.param_max(),
        }
    }

    pub fn mapping(&self) -> ParamMapping {
        self.mapping
    }

    /// Derived upper bound for every parameter.
    pub fn param_max(&self) -> f64 {
        self.max
    }

    pub fn get(&self, param: ShapeParam) -> f64 {
        match param {
            ShapeParam::Lambda => self.lambda,
            ShapeParam::Mu => self.mu,
            ShapeParam::Kappa => self.kappa,
            ShapeParam::Nu => self.nu,
        }
    }

    /// Set one parameter and rewrite the controlled rest vertex.
    ///
    /// Rejects values outside [0, param_max] or non-finite. A λ edit
    /// also rewrites B and a κ edit also rewrites D when the mapping is
    /// `SiblingFraction`, since those vertices depend on the sibling.
    pub fn set(
        &mut self,
        param: ShapeParam,
        value: f64,
        geo: &RingGeometry,
        mesh: &mut CellMesh,
    ) -> KaleidoResult<()> {
        if !value.is_finite() || value < 0.0 || value > self.max {
            return Err(KaleidoError::InvalidShapeParameter {
                param: param.name(),
                value,
                max: self.max,
            });
        }

        match param {
            ShapeParam::Lambda => self.lambda = value,
            ShapeParam::Mu => self.mu = value,
            ShapeParam::Kappa => self.kappa = value,
            ShapeParam::Nu => self.nu = value,
        }

        self.rewrite_vertex(param, geo, mesh);
        if self.mapping == ParamMapping::SiblingFraction {
            match param {
                ShapeParam::Lambda => self.rewrite_vertex(ShapeParam::Mu, geo, mesh),
                ShapeParam::Kappa => self.rewrite_vertex(ShapeParam::Nu, geo, mesh),
                _ => {}
            }
        }
        Ok(())
    }

    /// Recompute every controlled vertex from the current values.
    pub fn apply_all(&self, geo: &RingGeometry, mesh: &mut CellMesh) {
        for param in ShapeParam::ALL {
            self.rewrite_vertex(param, geo, mesh);
        }
    }

    fn rewrite_vertex(&self, param: ShapeParam, geo: &RingGeometry, mesh: &mut CellMesh) {
        let half_h = geo.h / 2.0;
        let v = &mut mesh.vertices[param.vertex_index()];
        match param {
            ShapeParam::Lambda => {
                v.x = -self.lambda;
                v.y = -half_h;
                v.z = 0.0;
            }
            ShapeParam::Mu => {
                v.x = match self.mapping {
                    ParamMapping::Absolute => self.mu,
                    ParamMapping::SiblingFraction => self.mu * self.lambda,
                };
                v.y = -half_h;
                v.z = 0.0;
            }
            ShapeParam::Kappa => {
                v.x = 0.0;
                v.y = half_h;
                v.z = -self.kappa;
            }
            ShapeParam::Nu => {
                v.x = 0.0;
                v.y = half_h;
                v.z = match self.mapping {
                    ParamMapping::Absolute => self.nu,
                    ParamMapping::SiblingFraction => self.nu * self.kappa,
                };
            }
        }
    }
}
