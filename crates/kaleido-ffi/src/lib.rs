// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Kaleidocycle Kernel.
//!
//! Exposes `KaleidoConfig` and `Kaleidocycle` to Python hosts that
//! drive the animation loop and own the rendering.
//!
//! Usage from Python:
//! ```python
//! from kaleido_kernel import KaleidoConfig, Kaleidocycle
//!
//! kal = Kaleidocycle(KaleidoConfig(cell_count=8))
//! kal.tick(0.016)
//! verts = kal.world_vertices(0)   # [(x, y, z), ...] 4 tuples
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use kaleido_engine::Kaleidocycle as KaleidocycleInner;
use kaleido_types::{
    KaleidoConfig as KaleidoConfigInner, KaleidoError, ParamMapping, ShapeParam,
};

fn to_py_err(e: KaleidoError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_param(name: &str) -> PyResult<ShapeParam> {
    match name {
        "lambda" => Ok(ShapeParam::Lambda),
        "mu" => Ok(ShapeParam::Mu),
        "kappa" => Ok(ShapeParam::Kappa),
        "nu" => Ok(ShapeParam::Nu),
        other => Err(PyValueError::new_err(format!(
            "unknown shape parameter '{other}' (expected lambda/mu/kappa/nu)"
        ))),
    }
}

// ─── KaleidoConfig ──────────────────────────────────────────────────

/// Python-visible configuration for a kaleidocycle instance.
#[pyclass(name = "KaleidoConfig")]
#[derive(Clone)]
struct PyKaleidoConfig {
    inner: KaleidoConfigInner,
}

#[pymethods]
impl PyKaleidoConfig {
    #[new]
    #[pyo3(signature = (
        edge_length = 1.0,
        cell_count = 8,
        mapping = "absolute",
        frame_tolerance = 1e-9,
        closure_tolerance = 1e-6,
        rotation_speed = 1.0,
    ))]
    fn new(
        edge_length: f64,
        cell_count: usize,
        mapping: &str,
        frame_tolerance: f64,
        closure_tolerance: f64,
        rotation_speed: f64,
    ) -> PyResult<Self> {
        let mapping = match mapping {
            "absolute" => ParamMapping::Absolute,
            "sibling_fraction" => ParamMapping::SiblingFraction,
            other => {
                return Err(PyValueError::new_err(format!(
                    "unknown mapping '{other}' (expected absolute/sibling_fraction)"
                )))
            }
        };
        let config = KaleidoConfigInner {
            edge_length,
            cell_count,
            mapping,
            frame_tolerance,
            closure_tolerance,
            rotation_speed,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = KaleidoConfigInner::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn edge_length(&self) -> f64 {
        self.inner.edge_length
    }

    #[getter]
    fn cell_count(&self) -> usize {
        self.inner.cell_count
    }

    fn __repr__(&self) -> String {
        format!(
            "KaleidoConfig(edge_length={}, cell_count={})",
            self.inner.edge_length, self.inner.cell_count
        )
    }
}

// ─── Kaleidocycle ───────────────────────────────────────────────────

/// Python-visible kaleidocycle engine.
#[pyclass(name = "Kaleidocycle")]
struct PyKaleidocycle {
    inner: Arc<Mutex<KaleidocycleInner>>,
}

#[pymethods]
impl PyKaleidocycle {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyKaleidoConfig>) -> PyResult<Self> {
        let config = config.map(|c| c.inner).unwrap_or_default();
        let inner = KaleidocycleInner::new(config).map_err(to_py_err)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
        })
    }

    /// Set the absolute phase and recompute the transform.
    fn tick(&self, time: f64) -> PyResult<()> {
        self.inner.lock().tick(time).map_err(to_py_err)?;
        Ok(())
    }

    /// Advance the phase by `dt` scaled by rotation_speed.
    fn advance(&self, dt: f64) -> PyResult<()> {
        self.inner.lock().advance(dt).map_err(to_py_err)?;
        Ok(())
    }

    /// Set one shape parameter: "lambda", "mu", "kappa", or "nu".
    fn set_shape_param(&self, name: &str, value: f64) -> PyResult<()> {
        let param = parse_param(name)?;
        self.inner
            .lock()
            .set_shape_param(param, value)
            .map_err(to_py_err)
    }

    fn shape_param(&self, name: &str) -> PyResult<f64> {
        let param = parse_param(name)?;
        Ok(self.inner.lock().shape().get(param))
    }

    /// Derived upper bound for every shape parameter.
    fn param_max(&self) -> f64 {
        self.inner.lock().shape().param_max()
    }

    /// World-space vertices of one cell as four (x, y, z) tuples.
    fn world_vertices(&self, cell: usize) -> PyResult<Vec<(f64, f64, f64)>> {
        let kal = self.inner.lock();
        if cell >= kal.geometry().n {
            return Err(PyValueError::new_err(format!(
                "cell index {cell} out of range (n={})",
                kal.geometry().n
            )));
        }
        Ok(kal
            .world_vertices(cell)
            .iter()
            .map(|p| (p.x, p.y, p.z))
            .collect())
    }

    /// Object matrix of one cell, 16 values row-major.
    fn cell_matrix(&self, cell: usize) -> PyResult<Vec<f64>> {
        let kal = self.inner.lock();
        if cell >= kal.geometry().n {
            return Err(PyValueError::new_err(format!(
                "cell index {cell} out of range (n={})",
                kal.geometry().n
            )));
        }
        let m = kal.cell_matrix(cell);
        Ok(m.transpose().as_slice().to_vec())
    }

    /// Current basis frame as (u, v, w) tuples; None before first tick.
    #[allow(clippy::type_complexity)]
    fn frame(&self) -> Option<((f64, f64, f64), (f64, f64, f64), (f64, f64, f64))> {
        let kal = self.inner.lock();
        kal.frame().map(|f| {
            (
                (f.u.x, f.u.y, f.u.z),
                (f.v.x, f.v.y, f.v.z),
                (f.w.x, f.w.y, f.w.z),
            )
        })
    }

    /// The constant reference axis n_α.
    fn n_alpha(&self) -> (f64, f64, f64) {
        let na = self.inner.lock().n_alpha();
        (na.x, na.y, na.z)
    }

    #[getter]
    fn time(&self) -> f64 {
        self.inner.lock().time()
    }

    #[getter]
    fn cell_count(&self) -> usize {
        self.inner.lock().geometry().n
    }

    /// Whether the renderer must re-upload vertex data.
    fn dirty(&self) -> bool {
        self.inner.lock().dirty()
    }

    fn clear_dirty(&self) {
        self.inner.lock().clear_dirty()
    }

    fn closure_satisfied(&self) -> bool {
        self.inner.lock().closure_satisfied()
    }

    fn __repr__(&self) -> String {
        let kal = self.inner.lock();
        format!(
            "Kaleidocycle(n={}, time={:.4})",
            kal.geometry().n,
            kal.time()
        )
    }
}

// ─── Module ─────────────────────────────────────────────────────────

#[pymodule]
fn kaleido_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKaleidoConfig>()?;
    m.add_class::<PyKaleidocycle>()?;
    Ok(())
}
