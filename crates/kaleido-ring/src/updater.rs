// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Geometry Updater
// ─────────────────────────────────────────────────────────────────────
//! Evaluates the per-frame dynamic transform against the immutable
//! rest pose. Earlier revisions of this engine mutated the shared
//! vertex buffer in place, undoing the previous transform with a full
//! inversion every tick; that round trip accumulates floating error,
//! so the updater instead stores only the current transform and
//! computes world vertices per query.
//!
//! The two observable states survive from that design: `Untransformed`
//! before the first tick (world pose == rest pose) and `Transformed`
//! after it.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use kaleido_kinematics::RigidTransform;

use crate::mesh::CellMesh;

/// Updater lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdaterState {
    /// No tick has been applied; geometry is at the rest pose.
    Untransformed,
    /// At least one tick applied; `current` is the live transform.
    Transformed,
}

/// Holds the current dynamic transform for the shared generating cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryUpdater {
    state: UpdaterState,
    current: RigidTransform,
}

impl Default for GeometryUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryUpdater {
    pub fn new() -> Self {
        Self {
            state: UpdaterState::Untransformed,
            current: RigidTransform::identity(),
        }
    }

    pub fn state(&self) -> UpdaterState {
        self.state
    }

    pub fn current(&self) -> &RigidTransform {
        &self.current
    }

    /// Replace the dynamic transform for a new phase value.
    pub fn advance(&mut self, transform: RigidTransform) {
        self.current = transform;
        self.state = UpdaterState::Transformed;
    }

    /// World-space vertex of the shared generating cell.
    pub fn world_vertex(&self, mesh: &CellMesh, index: usize) -> Point3<f64> {
        self.current.apply(&mesh.vertices[index])
    }

    /// World-space pose of the shared generating cell under an extra
    /// object-level placement: placement · current · rest.
    pub fn placed_vertices(
        &self,
        mesh: &CellMesh,
        placement: &RigidTransform,
    ) -> [Point3<f64>; 4] {
        mesh.vertices
            .map(|v| placement.apply(&self.current.apply(&v)))
    }
}
