// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Kaleidocycle Aggregate
// ─────────────────────────────────────────────────────────────────────
//! A closed ring of n congruent tetrahedral cells hinged along shared
//! edges. Per tick: phase → basis frame → chain offset → composed
//! rigid transform; per query: placement · transform · rest vertex.
//!
//! Cells 0..n−1 share one generating mesh; only their constant
//! placement differs, so a single shape edit moves the whole ring
//! while the hinge edges stay joined.

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use kaleido_kinematics::{chain_offset, BasisFrame, RigidTransform};
use kaleido_ring::{cell_placements, CellMesh, GeometryUpdater, ShapeController, UpdaterState};
use kaleido_types::{KaleidoConfig, KaleidoResult, RingGeometry, ShapeParam};

use crate::scene::SceneHandle;

/// Snapshot of one tick, serialisable for host-side tracing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickLog {
    pub step: u64,
    pub time: f64,
    pub u: Vector3<f64>,
    pub v: Vector3<f64>,
    pub w: Vector3<f64>,
    pub offset: Vector3<f64>,
}

/// The aggregate root: ring constants, rest pose, shape parameters,
/// current transform, and the n static placements.
pub struct Kaleidocycle {
    config: KaleidoConfig,
    geo: RingGeometry,
    mesh: CellMesh,
    shape: ShapeController,
    updater: GeometryUpdater,
    placements: Vec<RigidTransform>,
    frame: Option<BasisFrame>,
    offset: Vector3<f64>,
    time: f64,
    step_count: u64,
    dirty: bool,
}

impl Kaleidocycle {
    /// Build a ring with the regular generating cell (deformed only by
    /// the per-n parameter defaults).
    pub fn new(config: KaleidoConfig) -> KaleidoResult<Self> {
        config.validate()?;
        let geo = RingGeometry::new(config.edge_length, config.cell_count)?;
        let shape = ShapeController::with_defaults(&geo, config.mapping);
        let mut mesh = CellMesh::regular(&geo);
        shape.apply_all(&geo, &mut mesh);
        Self::assemble(config, geo, mesh, shape)
    }

    /// Build a ring around a host-supplied generating cell.
    ///
    /// Shape parameters keep their defaults but do not overwrite the
    /// custom vertices until the first explicit edit.
    pub fn with_custom_cell(
        config: KaleidoConfig,
        vertices: [Point3<f64>; 4],
    ) -> KaleidoResult<Self> {
        config.validate()?;
        let geo = RingGeometry::new(config.edge_length, config.cell_count)?;
        let shape = ShapeController::with_defaults(&geo, config.mapping);
        let mesh = CellMesh::from_vertices(vertices)?;
        Self::assemble(config, geo, mesh, shape)
    }

    fn assemble(
        config: KaleidoConfig,
        geo: RingGeometry,
        mesh: CellMesh,
        shape: ShapeController,
    ) -> KaleidoResult<Self> {
        let placements = cell_placements(&geo);
        Ok(Self {
            config,
            geo,
            mesh,
            shape,
            updater: GeometryUpdater::new(),
            placements,
            frame: None,
            offset: Vector3::zeros(),
            time: 0.0,
            step_count: 0,
            dirty: true,
        })
    }

    // ------------------------------------------------------------------
    // Tick surface
    // ------------------------------------------------------------------

    /// Set the absolute phase and recompute frame, offset, and
    /// transform. Fails on a degenerate frame (u ∥ n_α) without
    /// touching the previous state.
    pub fn tick(&mut self, time: f64) -> KaleidoResult<TickLog> {
        let frame = BasisFrame::at(time, &self.geo, self.config.frame_tolerance)?;
        let offset = chain_offset(&frame.w, &self.geo);
        self.updater
            .advance(RigidTransform::compose(&frame, offset));

        self.time = time;
        self.offset = offset;
        self.step_count += 1;
        self.dirty = true;

        let log = TickLog {
            step: self.step_count,
            time,
            u: frame.u,
            v: frame.v,
            w: frame.w,
            offset,
        };
        self.frame = Some(frame);
        Ok(log)
    }

    /// Advance the phase by `dt` scaled by the configured rotation
    /// speed (the host passes raw frame-callback deltas).
    pub fn advance(&mut self, dt: f64) -> KaleidoResult<TickLog> {
        self.tick(self.time + self.config.rotation_speed * dt)
    }

    /// Set one shape parameter, rewriting the controlled rest vertex.
    /// World geometry picks up the edit at the current phase — the
    /// visible rotation is never reset.
    pub fn set_shape_param(&mut self, param: ShapeParam, value: f64) -> KaleidoResult<()> {
        self.shape
            .set(param, value, &self.geo, &mut self.mesh)
            .inspect_err(|e| log::warn!("rejected shape edit: {e}"))?;
        self.dirty = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Geometry queries
    // ------------------------------------------------------------------

    /// World-space vertices of cell `index`.
    ///
    /// Panics if `index >= n`; boundary layers validate host-supplied
    /// indices before calling in.
    pub fn world_vertices(&self, index: usize) -> [Point3<f64>; 4] {
        self.updater
            .placed_vertices(&self.mesh, &self.placements[index])
    }

    /// Full object matrix for cell `index`: placement · dynamic.
    ///
    /// Panics if `index >= n`.
    pub fn cell_matrix(&self, index: usize) -> Matrix4<f64> {
        self.placements[index].to_homogeneous() * self.updater.current().to_homogeneous()
    }

    /// Count vertices of cell `a` that coincide with some vertex of
    /// cell `b` within the configured closure tolerance.
    ///
    /// Panics if `a >= n` or `b >= n`.
    pub fn shared_vertex_count(&self, a: usize, b: usize) -> usize {
        let va = self.world_vertices(a);
        let vb = self.world_vertices(b);
        va.iter()
            .filter(|p| vb.iter().any(|q| (*p - q).norm() < self.config.closure_tolerance))
            .count()
    }

    /// Whether every cyclically adjacent pair currently shares its
    /// hinge edge (two coincident vertices). Holds for even n; for odd
    /// n the wrap-around pair cannot join (the alternating mirror
    /// construction closes only on an even cell count).
    pub fn closure_satisfied(&self) -> bool {
        (0..self.geo.n).all(|i| self.shared_vertex_count(i, (i + 1) % self.geo.n) >= 2)
    }

    // ------------------------------------------------------------------
    // Read surface for the rendering collaborator
    // ------------------------------------------------------------------

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current basis frame; `None` before the first tick.
    pub fn frame(&self) -> Option<&BasisFrame> {
        self.frame.as_ref()
    }

    pub fn offset(&self) -> Vector3<f64> {
        self.offset
    }

    pub fn n_alpha(&self) -> Vector3<f64> {
        self.geo.n_alpha()
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geo
    }

    pub fn mesh(&self) -> &CellMesh {
        &self.mesh
    }

    pub fn shape(&self) -> &ShapeController {
        &self.shape
    }

    pub fn config(&self) -> &KaleidoConfig {
        &self.config
    }

    pub fn updater_state(&self) -> UpdaterState {
        self.updater.state()
    }

    /// True when vertex data changed since the last `clear_dirty` —
    /// the renderer must re-upload its buffers.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ------------------------------------------------------------------
    // Scene lifecycle
    // ------------------------------------------------------------------

    /// Attach all n cells to the scene.
    pub fn add_to_scene(&self, scene: &mut dyn SceneHandle) {
        for i in 0..self.geo.n {
            scene.attach_cell(i);
        }
    }

    /// Detach all n cells and release their resources. The instance
    /// itself is consumed.
    pub fn destroy(self, scene: &mut dyn SceneHandle) {
        log::info!("destroying kaleidocycle (n={})", self.geo.n);
        for i in 0..self.geo.n {
            scene.detach_cell(i);
            scene.release_cell(i);
        }
    }
}
