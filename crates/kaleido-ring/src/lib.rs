// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Ring Assembly
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Ring assembly: static inter-cell placements, the shape parameter
//! controller, the rest-pose cell mesh, and the per-frame geometry
//! updater.
//!
//! Architecture:
//!   - CellMesh: immutable-by-discipline rest pose (4 vertices, 4 faces)
//!   - cell_placements: n constant reflect/rotate transforms
//!   - ShapeController: λ/μ/κ/ν → rest vertices, range-checked
//!   - GeometryUpdater: rest pose × current transform, never in place

pub mod mesh;
pub mod placements;
pub mod shape;
pub mod updater;

pub use mesh::{CellMesh, FACES};
pub use placements::cell_placements;
pub use shape::ShapeController;
pub use updater::{GeometryUpdater, UpdaterState};
