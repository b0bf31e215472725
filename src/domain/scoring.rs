//! Sub-puntuaciones por fuente y fusión ponderada.
//!
//! `score = 100 − Σ (100 − sub_i) · w_i` sobre las fuentes presentes; una
//! fuente ausente no penaliza. Un defecto CRITICAL o un dibujo CRITICAL fuerza
//! el estado global a CRITICAL aunque la cifra sea alta.

use serde::{Deserialize, Serialize};

use super::age::TireAgeStatus;
use super::defect::{DefectSeverity, TireDefect};
use super::model::FusionWeights;
use super::tread::TreadStatus;

const DEFECT_PENALTY: [f32; 5] = [0.0, 20.0, 40.0, 70.0, 100.0];

pub fn tread_score(status: TreadStatus) -> f32 {
    match status {
        TreadStatus::Excellent => 100.0,
        TreadStatus::Good => 85.0,
        TreadStatus::Fair => 65.0,
        TreadStatus::Low => 35.0,
        TreadStatus::Critical => 10.0,
        TreadStatus::Unknown => 50.0,
    }
}

pub fn max_severity(defects: &[TireDefect]) -> DefectSeverity {
    defects.iter().map(|d| d.severity).max().unwrap_or(DefectSeverity::None)
}

/// Penalización por la peor severidad detectada; lista vacía = 0.
pub fn defect_penalty(defects: &[TireDefect]) -> f32 {
    DEFECT_PENALTY[max_severity(defects).priority() as usize]
}

pub fn defect_score(defects: &[TireDefect]) -> f32 {
    100.0 - defect_penalty(defects)
}

pub fn age_score(status: TireAgeStatus) -> f32 {
    match status {
        TireAgeStatus::New => 100.0,
        TireAgeStatus::Good => 85.0,
        TireAgeStatus::Aging => 60.0,
        TireAgeStatus::Old => 30.0,
        TireAgeStatus::Expired => 0.0,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 85 => HealthStatus::Excellent,
            s if s >= 70 => HealthStatus::Good,
            s if s >= 50 => HealthStatus::Fair,
            s if s >= 25 => HealthStatus::Poor,
            _ => HealthStatus::Critical,
        }
    }
}

/// Sub-puntuaciones de entrada; `None` = medición ausente.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SubScores {
    pub tread: Option<f32>,
    pub defect: Option<f32>,
    pub age: Option<f32>,
}

impl SubScores {
    pub fn collect(
        tread: Option<TreadStatus>,
        defects: Option<&[TireDefect]>,
        age: Option<TireAgeStatus>,
    ) -> Self {
        Self {
            tread: tread.map(tread_score),
            defect: defects.map(defect_score),
            age: age.map(age_score),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FusedScore {
    pub score: u8,
    pub status: HealthStatus,
    /// true si el estado vino forzado por la regla de suelo de seguridad.
    pub overridden: bool,
}

pub fn fuse_scores(subs: &SubScores, weights: &FusionWeights) -> u8 {
    let penalty: f32 = [
        (subs.tread, weights.tread),
        (subs.defect, weights.defect),
        (subs.age, weights.age),
    ]
    .into_iter()
    .filter_map(|(sub, w)| sub.map(|s| (100.0 - s.clamp(0.0, 100.0)) * w))
    .sum();

    (100.0 - penalty).clamp(0.0, 100.0).round() as u8
}

pub fn fuse(
    subs: &SubScores,
    weights: &FusionWeights,
    tread: Option<TreadStatus>,
    defects: &[TireDefect],
) -> FusedScore {
    let score = fuse_scores(subs, weights);
    let forced = tread == Some(TreadStatus::Critical)
        || defects.iter().any(|d| d.severity == DefectSeverity::Critical);

    FusedScore {
        score,
        status: if forced { HealthStatus::Critical } else { HealthStatus::from_score(score) },
        overridden: forced,
    }
}
