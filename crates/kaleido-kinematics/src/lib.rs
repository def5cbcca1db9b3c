// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Kinematics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Pure per-phase kinematics: orthonormal basis frame, chain-closure
//! translation solver, and rigid transform composition.
//!
//! Every function here is a stateless map from (phase, ring constants)
//! to geometry; the engine crate owns all mutable state.

pub mod frame;
pub mod transform;
pub mod translation;

pub use frame::BasisFrame;
pub use transform::RigidTransform;
pub use translation::chain_offset;
