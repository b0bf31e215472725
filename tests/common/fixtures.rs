#![allow(dead_code)]

use image::RgbImage;
use std::sync::Arc;

use tyreguard_scoring::application::detector::DefectDetector;
use tyreguard_scoring::application::ports::{
    DefectModelPort, SidewallRecognitionPort, TreadMeasurementPort,
};
use tyreguard_scoring::application::services::TireAnalysisService;
use tyreguard_scoring::domain::{
    age::AgeMeasurement, errors::{DomainError, DomainResult}, model::AnalysisConfig,
    postprocess::RawCandidate, tread::TreadMeasurement,
};

/// Modelo que siempre devuelve las mismas filas crudas.
pub struct ScriptedModel(pub Vec<RawCandidate>);

impl DefectModelPort for ScriptedModel {
    fn infer(&mut self, _image: &RgbImage) -> DomainResult<Vec<RawCandidate>> {
        Ok(self.0.clone())
    }
    fn name(&self) -> &str {
        "scripted"
    }
}

pub struct FixedTread(pub TreadMeasurement);

impl TreadMeasurementPort for FixedTread {
    fn measure(&self, _: &[u8]) -> DomainResult<TreadMeasurement> {
        Ok(self.0.clone())
    }
}

/// Lector del flanco a partir de la foto: sin imagen no hay edad.
pub struct FixedAge(pub u32);

impl SidewallRecognitionPort for FixedAge {
    fn recognize(&self, sidewall_image: Option<&[u8]>) -> DomainResult<AgeMeasurement> {
        sidewall_image.ok_or_else(|| DomainError::NotFound("sidewall image".into()))?;
        Ok(AgeMeasurement {
            manufacture_week: 1,
            manufacture_year: 2020,
            age_in_months: self.0,
            confidence: 1.0,
        })
    }
}

/// Fila `[cx, cy, w, h, obj, clases...]` para una sola clase activa.
pub fn row(cx: f32, cy: f32, w: f32, h: f32, obj: f32, class_id: usize, score: f32) -> RawCandidate {
    let mut values = vec![cx, cy, w, h, obj];
    let mut classes = vec![0.0; 10];
    classes[class_id] = score;
    values.extend(classes);
    RawCandidate::from_row(&values).expect("row has class scores")
}

pub fn service(model: Option<Box<dyn DefectModelPort>>) -> TireAnalysisService {
    let cfg = AnalysisConfig::default();
    TireAnalysisService::new(Arc::new(DefectDetector::new(model, &cfg)), cfg.scoring)
}

pub fn with_measurements(
    svc: TireAnalysisService,
    depths: Option<(f32, f32, f32)>,
    age_months: Option<u32>,
) -> TireAnalysisService {
    let svc = match depths {
        Some((i, c, o)) => svc.with_tread_provider(Arc::new(FixedTread(
            TreadMeasurement::from_depths(i, c, o, 0.95),
        ))),
        None => svc,
    };
    match age_months {
        Some(m) => svc.with_sidewall_provider(Arc::new(FixedAge(m))),
        None => svc,
    }
}
