// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! The `Kaleidocycle` aggregate and its host-facing surface:
//! `tick(time)`, `set_shape_param(...)`, dirty signalling, and the
//! scene attach/detach lifecycle.
//!
//! # Execution model
//!
//! 1. **Single-threaded, cooperative**: `tick` and shape edits are
//!    invoked from the same execution context (animation callback and
//!    input handler). No operation blocks; cancellation is the host
//!    simply not calling `tick` again.
//!
//! 2. **One shared generating cell**: all n cells reference the same
//!    rest pose and dynamic transform; each carries only its constant
//!    placement. One edit moves every cell at once, and geometry reads
//!    never interleave with writes within a frame.
//!
//! 3. **Atomic reconstruction**: switching cell count or loading a
//!    custom cell builds the replacement instance completely before
//!    the old one is destroyed — the scene never observes a partially
//!    initialised ring.

pub mod context;
pub mod kaleidocycle;
pub mod scene;

pub use context::EngineContext;
pub use kaleidocycle::{Kaleidocycle, TickLog};
pub use scene::{RecordingScene, SceneEvent, SceneHandle};
