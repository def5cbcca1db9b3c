// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Rest-Pose Cell Mesh
// ─────────────────────────────────────────────────────────────────────
//! The generating tetrahedron in its undeformed, unplaced pose:
//! four vertices A, B, C, D and four faces. A and B sit on the lower
//! hinge line (y = −h/2, z = 0), C and D on the upper one (x = 0,
//! y = +h/2). All phase-dependent motion is expressed through
//! transforms applied at query time; the rest pose itself only changes
//! on explicit shape edits.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use kaleido_types::{KaleidoError, KaleidoResult, RingGeometry};

/// Triangle faces by vertex index: ABD, ACB, BCD, CAD.
pub const FACES: [[usize; 3]; 4] = [[0, 1, 3], [0, 2, 1], [1, 2, 3], [2, 0, 3]];

/// Rest-pose tetrahedron mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellMesh {
    /// Vertices in order A, B, C, D.
    pub vertices: [Point3<f64>; 4],
}

impl CellMesh {
    /// The regular generating tetrahedron for the given ring constants:
    /// A = (−s/2, −h/2, 0), B = (s/2, −h/2, 0),
    /// C = (0, h/2, −s/2), D = (0, h/2, s/2).
    pub fn regular(geo: &RingGeometry) -> Self {
        let half_s = geo.s / 2.0;
        let half_h = geo.h / 2.0;
        Self {
            vertices: [
                Point3::new(-half_s, -half_h, 0.0),
                Point3::new(half_s, -half_h, 0.0),
                Point3::new(0.0, half_h, -half_s),
                Point3::new(0.0, half_h, half_s),
            ],
        }
    }

    /// A custom generating cell supplied by the host.
    ///
    /// Vertices must be finite and span a non-degenerate tetrahedron
    /// (non-zero signed volume).
    pub fn from_vertices(vertices: [Point3<f64>; 4]) -> KaleidoResult<Self> {
        for (i, v) in vertices.iter().enumerate() {
            if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
                return Err(KaleidoError::Numerical(format!(
                    "custom cell vertex {i} is not finite"
                )));
            }
        }
        let mesh = Self { vertices };
        if mesh.signed_volume().abs() < 1e-12 {
            return Err(KaleidoError::Numerical(
                "custom cell is degenerate (zero volume)".to_string(),
            ));
        }
        Ok(mesh)
    }

    /// Signed volume of the tetrahedron, (AB × AC) · AD / 6.
    pub fn signed_volume(&self) -> f64 {
        let [a, b, c, d] = &self.vertices;
        let ab = b - a;
        let ac = c - a;
        let ad = d - a;
        ab.cross(&ac).dot(&ad) / 6.0
    }
}
