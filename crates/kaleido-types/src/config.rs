// ─────────────────────────────────────────────────────────────────────
// Kaleidocycle Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{KaleidoError, KaleidoResult};

/// Policy for mapping the μ and ν shape parameters onto vertices.
///
/// Two conventions exist across revisions of the original engine and
/// they are not numerically equivalent, so the choice is explicit:
/// - `Absolute`: B = (μ, −h/2, 0) and D = (0, h/2, ν).
/// - `SiblingFraction`: μ and ν are fractions of λ and κ respectively,
///   i.e. B = (μ·λ, −h/2, 0) and D = (0, h/2, ν·κ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamMapping {
    #[default]
    Absolute,
    SiblingFraction,
}

/// Runtime configuration for a kaleidocycle instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KaleidoConfig {
    /// Edge length s of the generating tetrahedron. Must be positive.
    pub edge_length: f64,

    /// Number of cells n in the closed ring. Must be >= 3.
    pub cell_count: usize,

    /// μ/ν vertex mapping convention.
    pub mapping: ParamMapping,

    /// Cross-product norm below which the basis frame is considered
    /// degenerate. Default: 1e-9.
    pub frame_tolerance: f64,

    /// Tolerance for the edge-joint closure check. Default: 1e-6.
    pub closure_tolerance: f64,

    /// Phase advance per unit host time, as a multiple of the raw tick
    /// delta. Default: 1.0.
    pub rotation_speed: f64,
}

impl Default for KaleidoConfig {
    fn default() -> Self {
        Self {
            edge_length: 1.0,
            cell_count: 8,
            mapping: ParamMapping::Absolute,
            frame_tolerance: 1e-9,
            closure_tolerance: 1e-6,
            rotation_speed: 1.0,
        }
    }
}

impl KaleidoConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> KaleidoResult<()> {
        if !(self.edge_length.is_finite() && self.edge_length > 0.0) {
            return Err(KaleidoError::Config(format!(
                "edge_length must be finite and > 0, got {}",
                self.edge_length
            )));
        }
        if self.cell_count < 3 {
            return Err(KaleidoError::UnsupportedCellCount {
                n: self.cell_count,
            });
        }
        if !(self.frame_tolerance.is_finite() && self.frame_tolerance > 0.0) {
            return Err(KaleidoError::Config(format!(
                "frame_tolerance must be finite and > 0, got {}",
                self.frame_tolerance
            )));
        }
        if !(self.closure_tolerance.is_finite() && self.closure_tolerance > 0.0) {
            return Err(KaleidoError::Config(format!(
                "closure_tolerance must be finite and > 0, got {}",
                self.closure_tolerance
            )));
        }
        if !self.rotation_speed.is_finite() {
            return Err(KaleidoError::Config(format!(
                "rotation_speed must be finite, got {}",
                self.rotation_speed
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> KaleidoResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| KaleidoError::Config(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(KaleidoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_edge_length_rejected() {
        let config = KaleidoConfig {
            edge_length: 0.0,
            ..KaleidoConfig::default()
        };
        assert!(matches!(config.validate(), Err(KaleidoError::Config(_))));
    }

    #[test]
    fn test_cell_count_below_three_rejected() {
        let config = KaleidoConfig {
            cell_count: 2,
            ..KaleidoConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KaleidoError::UnsupportedCellCount { n: 2 })
        ));
    }

    #[test]
    fn test_nan_rotation_speed_rejected() {
        let config = KaleidoConfig {
            rotation_speed: f64::NAN,
            ..KaleidoConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json() {
        let config = KaleidoConfig::from_json(
            r#"{
                "edge_length": 2.0,
                "cell_count": 6,
                "mapping": "sibling_fraction",
                "frame_tolerance": 1e-9,
                "closure_tolerance": 1e-6,
                "rotation_speed": 0.5
            }"#,
        )
        .unwrap();
        assert_eq!(config.cell_count, 6);
        assert_eq!(config.mapping, ParamMapping::SiblingFraction);
        assert!((config.edge_length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            KaleidoConfig::from_json("{not json"),
            Err(KaleidoError::Config(_))
        ));
    }
}
