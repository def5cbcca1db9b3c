// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Kaleidocycle Kernel — the kinematic transform engine for closed
//! rings of hinged tetrahedral cells.

pub mod config;
pub mod error;
pub mod geometry;

pub use config::{KaleidoConfig, ParamMapping};
pub use error::{KaleidoError, KaleidoResult};
pub use geometry::{RingGeometry, ShapeParam};
