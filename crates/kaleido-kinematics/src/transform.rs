// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Rigid Transform Composer
// ─────────────────────────────────────────────────────────────────────
//! Assembles the per-phase frame and offset into one rigid affine
//! transform. The linear columns are **u, w, v** — not u, v, w. The
//! ordering encodes which local axis of the generating tetrahedron
//! aligns with the chain's rotation axis and must not be changed.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::frame::BasisFrame;

/// A rigid affine transform: orthonormal linear part + translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Linear part, columns (u, w, v).
    pub linear: Matrix3<f64>,
    /// Translation column M.
    pub translation: Vector3<f64>,
}

impl RigidTransform {
    /// Identity transform (the untransformed rest pose).
    pub fn identity() -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Compose the dynamic transform from a frame and offset.
    pub fn compose(frame: &BasisFrame, offset: Vector3<f64>) -> Self {
        Self {
            linear: Matrix3::from_columns(&[frame.u, frame.w, frame.v]),
            translation: offset,
        }
    }

    /// Apply to a point: R·p + M.
    pub fn apply(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.linear * p.coords + self.translation)
    }

    /// Inverse of a rigid transform: Rᵀ composed with −Rᵀ·M.
    ///
    /// The linear part is orthonormal by construction, so transposition
    /// is exact — no general 4×4 inversion is ever needed.
    pub fn inverse(&self) -> Self {
        let rt = self.linear.transpose();
        Self {
            linear: rt,
            translation: -(rt * self.translation),
        }
    }

    /// Homogeneous 4×4 form for renderers that consume full matrices.
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut m = self.linear.to_homogeneous();
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        m
    }

    /// Worst deviation of the linear part from orthonormality.
    pub fn rigidity_error(&self) -> f64 {
        let gram = self.linear.transpose() * self.linear;
        (gram - Matrix3::identity()).abs().max()
    }
}
