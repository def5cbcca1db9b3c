// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Cell Placement Assembler
// ─────────────────────────────────────────────────────────────────────
//! The n constant transforms relating cell i to cell 0. Consecutive
//! cells are mirror images under the ring's dihedral symmetry, hence
//! the parity split:
//!
//!   cell 0        — identity
//!   cell 1        — reflection across the line y = x·tan(α)
//!   cell i even   — rotation about Z by i·α
//!   cell i odd ≥3 — reflection, then rotation about Z by −(i−1)·α
//!
//! Built once per instance and never recomputed.

use nalgebra::{Matrix3, Rotation3, Vector3};

use kaleido_kinematics::RigidTransform;
use kaleido_types::RingGeometry;

/// Reflection across the line y = x·tan(α) through the origin,
/// identity on Z (standard 2-D reflection matrix in the XY plane).
fn reflection(alpha: f64) -> Matrix3<f64> {
    let (sin, cos) = alpha.sin_cos();
    Matrix3::new(
        1.0 - 2.0 * sin * sin,
        2.0 * sin * cos,
        0.0,
        2.0 * sin * cos,
        1.0 - 2.0 * cos * cos,
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

fn rotation_z(angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle).into_inner()
}

/// Build the n static placement transforms (all pure linear, zero
/// translation — the chain offset lives in the dynamic transform).
pub fn cell_placements(geo: &RingGeometry) -> Vec<RigidTransform> {
    let reflect = reflection(geo.alpha);
    let mut out = Vec::with_capacity(geo.n);

    for i in 0..geo.n {
        let linear = if i == 0 {
            Matrix3::identity()
        } else if i == 1 {
            reflect
        } else if i % 2 == 0 {
            rotation_z(i as f64 * geo.alpha)
        } else {
            reflect * rotation_z(-((i - 1) as f64) * geo.alpha)
        };
        out.push(RigidTransform {
            linear,
            translation: Vector3::zeros(),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn geo(n: usize) -> RingGeometry {
        RingGeometry::new(1.0, n).unwrap()
    }

    #[test]
    fn test_count_and_identity_head() {
        let placements = cell_placements(&geo(8));
        assert_eq!(placements.len(), 8);
        assert!((placements[0].linear - Matrix3::identity()).abs().max() < 1e-15);
        assert_eq!(placements[0].translation.norm(), 0.0);
    }

    #[test]
    fn test_reflection_is_involution() {
        let r = reflection(geo(8).alpha);
        assert!((r * r - Matrix3::identity()).abs().max() < 1e-12);
    }

    #[test]
    fn test_reflection_fixes_axis_line() {
        // Points on y = x·tan(α) are fixed by the reflection
        let g = geo(8);
        let r = reflection(g.alpha);
        let p = Vector3::new(g.alpha.cos(), g.alpha.sin(), 0.7) * 2.5;
        let q = r * Vector3::new(p.x, p.y, 0.0) + Vector3::new(0.0, 0.0, p.z);
        assert!((q - p).norm() < 1e-12);
    }

    #[test]
    fn test_parity_determinants() {
        // Odd cells are mirror images (det −1), even cells proper (det +1)
        for n in [6, 8, 12] {
            let placements = cell_placements(&geo(n));
            for (i, p) in placements.iter().enumerate() {
                let det = p.linear.determinant();
                let expected = if i % 2 == 0 { 1.0 } else { -1.0 };
                assert!(
                    (det - expected).abs() < 1e-12,
                    "cell {i} of n={n}: det={det}"
                );
            }
        }
    }

    #[test]
    fn test_placements_preserve_z_magnitude_structure() {
        // Reflection and Z-rotation both act as identity on |z|
        let placements = cell_placements(&geo(8));
        let p = Point3::new(0.4, -0.2, 0.9);
        for placement in &placements {
            let q = placement.apply(&p);
            assert!((q.z.abs() - p.z.abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_even_cells_are_rotations_by_i_alpha() {
        let g = geo(8);
        let placements = cell_placements(&g);
        let p = Point3::new(1.0, 0.0, 0.0);
        for i in (2..8).step_by(2) {
            let q = placements[i].apply(&p);
            let angle = (i as f64) * g.alpha;
            assert!((q.x - angle.cos()).abs() < 1e-12, "cell {i}");
            assert!((q.y - angle.sin()).abs() < 1e-12, "cell {i}");
        }
    }

    #[test]
    fn test_all_placements_orthonormal() {
        for n in 3..=12 {
            for (i, p) in cell_placements(&geo(n)).iter().enumerate() {
                assert!(
                    p.rigidity_error() < 1e-12,
                    "placement {i} of n={n} not orthonormal"
                );
            }
        }
    }
}
