use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelId {
    pub name: String,       // logical name, e.g. "tyre-defects-v2"
    pub onnx_path: String,  // filesystem path
}

/// Parámetros del post-procesado de detecciones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub input_size: u32,        // 640 typical
    pub conf_threshold: f32,    // 0..1
    pub iou_threshold: f32,     // 0..1
    pub max_detections: usize,  // e.g. 100
    /// Etiqueta de cada clase del modelo, por índice.
    pub labels: Vec<String>,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            input_size: 640,
            conf_threshold: 0.5,
            iou_threshold: 0.45,
            max_detections: 100,
            labels: [
                "good", "crack", "bulge", "cut", "puncture", "sidewall_damage",
                "tread_separation", "uneven_wear", "bald_spot", "foreign_object",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Pesos de la fusión de sub-puntuaciones. Deben sumar 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FusionWeights {
    pub tread: f32,
    pub defect: f32,
    pub age: f32,
}

impl FusionWeights {
    pub const DEFAULT: FusionWeights = FusionWeights { tread: 0.35, defect: 0.40, age: 0.25 };

    pub fn sum(&self) -> f32 {
        self.tread + self.defect + self.age
    }

    pub fn validate(&self) -> DomainResult<()> {
        let all = [self.tread, self.defect, self.age];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DomainError::InvalidInput(format!("pesos de fusión inválidos: {:?}", self)));
        }
        if (self.sum() - 1.0).abs() > 1e-6 {
            return Err(DomainError::InvalidInput(format!(
                "los pesos de fusión deben sumar 1.0 (suman {})",
                self.sum()
            )));
        }
        Ok(())
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    pub weights: FusionWeights,
    /// Por debajo de esta confianza la severidad de un defecto baja un nivel.
    pub severity_downgrade_confidence: f32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            weights: FusionWeights::DEFAULT,
            severity_downgrade_confidence: 0.5,
        }
    }
}

/// Umbrales del analizador heurístico (aproximado, sin modelo).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicParams {
    pub sample_size: u32,
    pub bright_threshold: f32,
    pub bright_penalty: u8,
    pub edge_threshold: f32,
    pub edge_penalty: u8,
    pub variance_threshold: f32,
    pub variance_penalty: u8,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        Self {
            sample_size: 50,
            bright_threshold: 180.0,
            bright_penalty: 15,
            edge_threshold: 25.0,
            edge_penalty: 20,
            variance_threshold: 2500.0,
            variance_penalty: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub model: Option<ModelId>,
    pub detector: DetectorParams,
    pub scoring: ScoringParams,
    pub heuristic: HeuristicParams,
}

impl AnalysisConfig {
    /// Lee la configuración desde un JSON; sin ruta se usan los valores por defecto.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let cfg = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                serde_json::from_str::<AnalysisConfig>(&raw)?
            }
            None => AnalysisConfig::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let d = &self.detector;
        if d.input_size == 0 {
            return Err(DomainError::InvalidInput("input_size debe ser > 0".into()));
        }
        for (name, v) in [
            ("conf_threshold", d.conf_threshold),
            ("iou_threshold", d.iou_threshold),
            ("severity_downgrade_confidence", self.scoring.severity_downgrade_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(DomainError::InvalidInput(format!("{name} fuera de [0,1]: {v}")));
            }
        }
        if self.heuristic.sample_size < 2 {
            return Err(DomainError::InvalidInput("sample_size debe ser >= 2".into()));
        }
        self.scoring.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((FusionWeights::DEFAULT.sum() - 1.0).abs() <= 1e-6);
        assert!(FusionWeights::DEFAULT.validate().is_ok());
    }

    #[test]
    fn rejects_unbalanced_weights() {
        let w = FusionWeights { tread: 0.5, defect: 0.5, age: 0.25 };
        assert!(matches!(w.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut cfg = AnalysisConfig::default();
        cfg.detector.iou_threshold = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{ "detector": { "conf_threshold": 0.6 } }"#).unwrap();
        assert_eq!(cfg.detector.conf_threshold, 0.6);
        assert_eq!(cfg.detector.iou_threshold, 0.45);
        assert_eq!(cfg.detector.labels.len(), 10);
        assert!(cfg.model.is_none());
    }
}
