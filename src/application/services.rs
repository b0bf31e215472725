use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};
use tracing::{info, warn};

use crate::{
    application::{
        detector::{DefectFindings, DefectDetector},
        ports::{SidewallRecognitionPort, TreadMeasurementPort},
    },
    domain::{
        analysis::{ComprehensiveTireAnalysis, DetectionSource},
        errors::{DomainError, DomainResult},
        model::ScoringParams,
    },
};

/// Caso de uso principal: `analyze(imagen_dibujo, imagen_flanco?)`.
///
/// Lanza en paralelo la detección de defectos, la medición del dibujo y el
/// reconocimiento del flanco, y sólo fusiona cuando todas han terminado o
/// fallado. Los proveedores se inyectan; el servicio no guarda referencias a
/// las imágenes más allá de la llamada.
#[derive(Clone)]
pub struct TireAnalysisService {
    detector: Arc<DefectDetector>,
    tread: Option<Arc<dyn TreadMeasurementPort>>,
    sidewall: Option<Arc<dyn SidewallRecognitionPort>>,
    scoring: ScoringParams,
}

fn join<T>(handle: ScopedJoinHandle<'_, DomainResult<T>>) -> DomainResult<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(DomainError::OperationFailed("el sub-análisis abortó".into())))
}

impl TireAnalysisService {
    pub fn new(detector: Arc<DefectDetector>, scoring: ScoringParams) -> Self {
        Self { detector, tread: None, sidewall: None, scoring }
    }

    pub fn with_tread_provider(mut self, provider: Arc<dyn TreadMeasurementPort>) -> Self {
        self.tread = Some(provider);
        self
    }

    pub fn with_sidewall_provider(mut self, provider: Arc<dyn SidewallRecognitionPort>) -> Self {
        self.sidewall = Some(provider);
        self
    }

    pub fn detector(&self) -> &DefectDetector {
        &self.detector
    }

    pub fn analyze(&self, tread_image: &[u8], sidewall_image: Option<&[u8]>) -> ComprehensiveTireAnalysis {
        // fan-out / fan-in: el scope no termina hasta que todos los hilos acaban
        let (tread_defects, sidewall_defects, tread, age) = thread::scope(|s| {
            let detector = &self.detector;
            let h_defects = s.spawn(move || detector.detect_encoded(tread_image));
            let h_sidewall_defects =
                sidewall_image.map(|img| s.spawn(move || detector.detect_encoded(img)));
            let h_tread = self
                .tread
                .as_ref()
                .map(|p| s.spawn(move || p.measure(tread_image)));
            let h_age = self
                .sidewall
                .as_ref()
                .map(|p| s.spawn(move || p.recognize(sidewall_image)));

            (
                join(h_defects),
                h_sidewall_defects.map(join),
                h_tread.map(join),
                h_age.map(join),
            )
        });

        let mut findings = match tread_defects {
            Ok(f) => f,
            Err(e) => {
                warn!("Imagen del dibujo ilegible: {}", e);
                return ComprehensiveTireAnalysis::decode_failure(format!("tread image: {e}"));
            }
        };

        if let Some(side) = sidewall_defects {
            match side {
                Ok(side) => merge(&mut findings, side),
                Err(e) => {
                    warn!("Imagen del flanco ilegible: {}", e);
                    return ComprehensiveTireAnalysis::decode_failure(format!("sidewall image: {e}"));
                }
            }
        }

        let tread = tread.and_then(|r| {
            r.map_err(|e| warn!("Medición del dibujo no disponible: {}", e)).ok()
        });
        let age = age.and_then(|r| {
            r.map_err(|e| warn!("Código DOT no disponible: {}", e)).ok()
        });

        let analysis = ComprehensiveTireAnalysis::assemble(
            tread,
            age,
            findings.defects,
            Some(findings.source),
            findings.heuristic_score,
            &self.scoring,
        );

        info!(
            "Análisis completado: {} ({:?}), {} defectos, acción {:?}",
            analysis.overall_health_score,
            analysis.overall_status,
            analysis.defects.len(),
            analysis.action_required
        );
        analysis
    }
}

/// Une los defectos del flanco con los del dibujo; si alguna imagen pasó por
/// la heurística, el resultado completo se marca como heurístico.
fn merge(into: &mut DefectFindings, other: DefectFindings) {
    into.defects.extend(other.defects);
    if other.source == DetectionSource::Heuristic {
        into.source = DetectionSource::Heuristic;
        into.heuristic_score = match (into.heuristic_score, other.heuristic_score) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }
}
