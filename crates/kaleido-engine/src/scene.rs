// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Scene Capability Interface
// ─────────────────────────────────────────────────────────────────────
//! The small capability surface the engine needs from a rendering
//! collaborator: attach and detach drawable cells, and release their
//! geometry/material resources. Production hosts implement
//! `SceneHandle` over their scene graph; the in-memory recording
//! backend exists for tests and headless runs.

/// Trait for scene-graph backends consuming the engine's cells.
pub trait SceneHandle {
    /// Add cell `index` to the scene.
    fn attach_cell(&mut self, index: usize);

    /// Remove cell `index` from the scene.
    fn detach_cell(&mut self, index: usize);

    /// Release GPU-side geometry/material resources for cell `index`.
    fn release_cell(&mut self, index: usize);
}

/// One recorded scene mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Attached(usize),
    Detached(usize),
    Released(usize),
}

/// In-memory scene that records every mutation, for tests.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub events: Vec<SceneEvent>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells currently attached.
    pub fn attached_count(&self) -> usize {
        let mut count: isize = 0;
        for event in &self.events {
            match event {
                SceneEvent::Attached(_) => count += 1,
                SceneEvent::Detached(_) => count -= 1,
                SceneEvent::Released(_) => {}
            }
        }
        count.max(0) as usize
    }
}

impl SceneHandle for RecordingScene {
    fn attach_cell(&mut self, index: usize) {
        self.events.push(SceneEvent::Attached(index));
    }

    fn detach_cell(&mut self, index: usize) {
        self.events.push(SceneEvent::Detached(index));
    }

    fn release_cell(&mut self, index: usize) {
        self.events.push(SceneEvent::Released(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_scene_counts() {
        let mut scene = RecordingScene::new();
        scene.attach_cell(0);
        scene.attach_cell(1);
        scene.detach_cell(0);
        assert_eq!(scene.attached_count(), 1);
        assert_eq!(scene.events.len(), 3);
    }

    #[test]
    fn test_release_does_not_affect_attachment() {
        let mut scene = RecordingScene::new();
        scene.attach_cell(0);
        scene.release_cell(0);
        assert_eq!(scene.attached_count(), 1);
    }
}
