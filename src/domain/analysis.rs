use serde::{Deserialize, Serialize};
use tracing::debug;

use super::age::{AgeMeasurement, TireAgeStatus};
use super::defect::TireDefect;
use super::model::ScoringParams;
use super::recommendation::{
    action_required, generate_recommendations, ActionRequired, Findings, Recommendation,
    ServiceType,
};
use super::scoring::{fuse, HealthStatus, SubScores};
use super::tread::TreadMeasurement;

/// Origen de los defectos: modelo entrenado o heurística aproximada.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionSource {
    Model,
    Heuristic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveTireAnalysis {
    pub tread: Option<TreadMeasurement>,
    pub age: Option<AgeMeasurement>,
    pub defects: Vec<TireDefect>,
    pub sub_scores: SubScores,
    pub overall_health_score: u8,
    pub overall_status: HealthStatus,
    pub recommendations: Vec<Recommendation>,
    pub action_required: ActionRequired,
    pub detection_source: Option<DetectionSource>,
    /// Puntuación propia del analizador heurístico (100 menos penalizaciones),
    /// sólo cuando no hubo modelo.
    pub heuristic_score: Option<u8>,
    /// Sólo presente en resultados de error (imagen ilegible).
    pub error: Option<String>,
}

impl ComprehensiveTireAnalysis {
    /// Fusiona las mediciones disponibles y aplica la tabla de recomendaciones.
    pub fn assemble(
        tread: Option<TreadMeasurement>,
        age: Option<AgeMeasurement>,
        defects: Vec<TireDefect>,
        detection_source: Option<DetectionSource>,
        heuristic_score: Option<u8>,
        params: &ScoringParams,
    ) -> Self {
        let tread_status = tread.as_ref().map(|t| t.status);
        let age_status: Option<TireAgeStatus> = age.as_ref().map(|a| a.status());
        // la detección de defectos siempre aporta término salvo que no se haya ejecutado
        let defect_term = detection_source.map(|_| defects.as_slice());

        let sub_scores = SubScores::collect(tread_status, defect_term, age_status);
        let fused = fuse(&sub_scores, &params.weights, tread_status, &defects);

        let findings = Findings {
            defects: &defects,
            tread_status,
            wear_pattern: tread.as_ref().map(|t| t.wear_pattern),
            age_status,
            overall: fused.status,
        };
        let recommendations = generate_recommendations(&findings);
        let action = action_required(&findings);

        debug!(
            tread = ?sub_scores.tread,
            defect = ?sub_scores.defect,
            age = ?sub_scores.age,
            score = fused.score,
            status = ?fused.status,
            overridden = fused.overridden,
            "puntuación fusionada"
        );

        Self {
            tread,
            age,
            defects,
            sub_scores,
            overall_health_score: fused.score,
            overall_status: fused.status,
            recommendations,
            action_required: action,
            detection_source,
            heuristic_score,
            error: None,
        }
    }

    /// Resultado fijo para una imagen que no se pudo decodificar.
    pub fn decode_failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            tread: None,
            age: None,
            defects: Vec::new(),
            sub_scores: SubScores::default(),
            overall_health_score: 0,
            overall_status: HealthStatus::Critical,
            recommendations: vec![Recommendation {
                title: "Retake Photo".to_string(),
                description: format!("The image could not be analyzed: {message}"),
                priority: 1,
                estimated_cost: None,
                service_type: ServiceType::Inspection,
            }],
            action_required: ActionRequired::ServiceNow,
            detection_source: None,
            heuristic_score: None,
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
