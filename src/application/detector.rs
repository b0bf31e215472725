use image::DynamicImage;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::application::heuristic::HeuristicAnalyzer;
use crate::application::ports::DefectModelPort;
use crate::domain::{
    analysis::DetectionSource,
    defect::TireDefect,
    errors::{DomainError, DomainResult},
    model::{AnalysisConfig, DetectorParams},
    postprocess::postprocess,
};

#[derive(Debug, Clone)]
pub struct DefectFindings {
    pub defects: Vec<TireDefect>,
    pub source: DetectionSource,
    /// Puntuación propia de la heurística, sólo en modo respaldo.
    pub heuristic_score: Option<u8>,
}

/// Detección de defectos con modelo si hay uno inyectado y heurística si no.
/// El modelo lo construye y lo libera quien crea el detector.
pub struct DefectDetector {
    model: Option<Mutex<Box<dyn DefectModelPort>>>,
    params: DetectorParams,
    downgrade_below: f32,
    heuristic: HeuristicAnalyzer,
}

impl DefectDetector {
    pub fn new(model: Option<Box<dyn DefectModelPort>>, config: &AnalysisConfig) -> Self {
        let downgrade_below = config.scoring.severity_downgrade_confidence;
        Self {
            model: model.map(Mutex::new),
            params: config.detector.clone(),
            downgrade_below,
            heuristic: HeuristicAnalyzer::new(config.heuristic.clone(), downgrade_below),
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn detect_encoded(&self, bytes: &[u8]) -> DomainResult<DefectFindings> {
        let img = image::load_from_memory(bytes).map_err(|e| DomainError::Decode(e.to_string()))?;
        Ok(self.detect(&img))
    }

    pub fn detect(&self, image: &DynamicImage) -> DefectFindings {
        if let Some(model) = &self.model {
            // un lock envenenado sólo indica un pánico previo; la sesión sigue siendo usable
            let mut model = model.lock().unwrap_or_else(|e| e.into_inner());
            let rgb = image.to_rgb8();

            match model.infer(&rgb) {
                Ok(candidates) => {
                    let detections = postprocess(&candidates, rgb.width(), rgb.height(), &self.params);
                    let defects = detections
                        .iter()
                        .filter_map(|d| {
                            let defect = TireDefect::from_detection(d, self.downgrade_below);
                            if defect.is_none() {
                                debug!(label = %d.label, "etiqueta sin tipo de defecto, se ignora");
                            }
                            defect
                        })
                        .filter(TireDefect::is_defect)
                        .collect();

                    return DefectFindings {
                        defects,
                        source: DetectionSource::Model,
                        heuristic_score: None,
                    };
                }
                Err(e) => warn!("Modelo {} falló, usando heurística: {}", model.name(), e),
            }
        }

        let report = self.heuristic.analyze(image);
        DefectFindings {
            defects: report.defects,
            source: DetectionSource::Heuristic,
            heuristic_score: Some(report.score),
        }
    }
}
