// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Engine Context
// ─────────────────────────────────────────────────────────────────────
//! Explicit owner of the live `Kaleidocycle` and its scene handle.
//! Host callbacks (sliders, cell-count switches, custom-cell loads)
//! reach the current instance through this context instead of an
//! ambient global; replacement is an explicit rebuild that either
//! succeeds completely or leaves the old instance running.

use nalgebra::Point3;

use kaleido_types::{KaleidoConfig, KaleidoResult, ShapeParam};

use crate::kaleidocycle::{Kaleidocycle, TickLog};
use crate::scene::SceneHandle;

/// Owns the current instance and the scene it is attached to.
pub struct EngineContext<S: SceneHandle> {
    kal: Kaleidocycle,
    scene: S,
}

impl<S: SceneHandle> EngineContext<S> {
    pub fn new(config: KaleidoConfig, mut scene: S) -> KaleidoResult<Self> {
        let kal = Kaleidocycle::new(config)?;
        kal.add_to_scene(&mut scene);
        Ok(Self { kal, scene })
    }

    pub fn kaleidocycle(&self) -> &Kaleidocycle {
        &self.kal
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn tick(&mut self, time: f64) -> KaleidoResult<TickLog> {
        self.kal.tick(time)
    }

    pub fn advance(&mut self, dt: f64) -> KaleidoResult<TickLog> {
        self.kal.advance(dt)
    }

    pub fn set_shape_param(&mut self, param: ShapeParam, value: f64) -> KaleidoResult<()> {
        self.kal.set_shape_param(param, value)
    }

    /// Swap in a fully built replacement, then destroy the old ring.
    fn replace(&mut self, next: Kaleidocycle) {
        let old = std::mem::replace(&mut self.kal, next);
        old.destroy(&mut self.scene);
        self.kal.add_to_scene(&mut self.scene);
    }

    /// Rebuild with a different cell count. On failure the current
    /// instance keeps running untouched.
    pub fn set_cell_count(&mut self, n: usize) -> KaleidoResult<()> {
        let config = KaleidoConfig {
            cell_count: n,
            ..self.kal.config().clone()
        };
        let next = Kaleidocycle::new(config)?;
        log::info!("switching cell count to n={n}");
        self.replace(next);
        Ok(())
    }

    /// Rebuild around a custom generating cell.
    pub fn load_custom_cell(&mut self, vertices: [Point3<f64>; 4]) -> KaleidoResult<()> {
        let next = Kaleidocycle::with_custom_cell(self.kal.config().clone(), vertices)?;
        self.replace(next);
        Ok(())
    }

    /// Rebuild with defaults (fresh regular cell, parameters reset).
    pub fn reset(&mut self) -> KaleidoResult<()> {
        let next = Kaleidocycle::new(self.kal.config().clone())?;
        self.replace(next);
        Ok(())
    }

    /// Tear down the context, detaching everything from the scene.
    pub fn shutdown(self) -> S {
        let mut scene = self.scene;
        self.kal.destroy(&mut scene);
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{RecordingScene, SceneEvent};

    fn context(n: usize) -> EngineContext<RecordingScene> {
        let config = KaleidoConfig {
            cell_count: n,
            ..KaleidoConfig::default()
        };
        EngineContext::new(config, RecordingScene::new()).unwrap()
    }

    #[test]
    fn test_construction_attaches_all_cells() {
        let ctx = context(8);
        assert_eq!(ctx.scene().attached_count(), 8);
    }

    #[test]
    fn test_set_cell_count_swaps_atomically() {
        let mut ctx = context(8);
        ctx.tick(0.4).unwrap();
        ctx.set_cell_count(12).unwrap();
        assert_eq!(ctx.kaleidocycle().geometry().n, 12);
        assert_eq!(ctx.scene().attached_count(), 12);
        // New instance starts untransformed
        assert!(ctx.kaleidocycle().frame().is_none());
    }

    #[test]
    fn test_invalid_cell_count_keeps_old_instance() {
        let mut ctx = context(8);
        assert!(ctx.set_cell_count(2).is_err());
        assert_eq!(ctx.kaleidocycle().geometry().n, 8);
        assert_eq!(ctx.scene().attached_count(), 8);
    }

    #[test]
    fn test_invalid_custom_cell_keeps_old_instance() {
        use nalgebra::Point3;
        let mut ctx = context(8);
        let flat = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 0.5, 0.0),
        ];
        assert!(ctx.load_custom_cell(flat).is_err());
        assert_eq!(ctx.scene().attached_count(), 8);
    }

    #[test]
    fn test_load_custom_cell_swaps_mesh_and_scene() {
        use nalgebra::Point3;
        let mut ctx = context(8);
        ctx.tick(0.4).unwrap();
        let vertices = [
            Point3::new(-0.4, -0.3, 0.0),
            Point3::new(0.4, -0.3, 0.0),
            Point3::new(0.0, 0.3, -0.4),
            Point3::new(0.0, 0.3, 0.4),
        ];
        ctx.load_custom_cell(vertices).unwrap();
        for i in 0..4 {
            assert!((ctx.kaleidocycle().mesh().vertices[i] - vertices[i]).norm() < 1e-15);
        }
        // Old ring detached and released, replacement fully attached
        assert_eq!(ctx.scene().attached_count(), 8);
        let releases = ctx
            .scene()
            .events
            .iter()
            .filter(|e| matches!(e, SceneEvent::Released(_)))
            .count();
        assert_eq!(releases, 8);
        // Replacement starts untransformed
        assert!(ctx.kaleidocycle().frame().is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut ctx = context(8);
        ctx.set_shape_param(ShapeParam::Lambda, 0.2).unwrap();
        ctx.reset().unwrap();
        assert!((ctx.kaleidocycle().shape().lambda - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let ctx = context(8);
        let scene = ctx.shutdown();
        assert_eq!(scene.attached_count(), 0);
        let releases = scene
            .events
            .iter()
            .filter(|e| matches!(e, SceneEvent::Released(_)))
            .count();
        assert_eq!(releases, 8);
    }
}
