use serde::{Deserialize, Serialize};

/// Profundidad legal mínima habitual (mm).
pub const LEGAL_MIN_DEPTH_MM: f32 = 1.6;

const CENTER_EDGE_DELTA_MM: f32 = 0.5;
const SIDE_DELTA_MM: f32 = 0.8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreadStatus {
    Excellent,
    Good,
    Fair,
    Low,
    Critical,
    Unknown,
}

impl TreadStatus {
    pub fn from_min_depth(min_depth_mm: f32) -> Self {
        if !min_depth_mm.is_finite() || min_depth_mm < 0.0 {
            return TreadStatus::Unknown;
        }
        match min_depth_mm {
            d if d >= 6.0 => TreadStatus::Excellent,
            d if d >= 4.0 => TreadStatus::Good,
            d if d >= 3.0 => TreadStatus::Fair,
            d if d >= LEGAL_MIN_DEPTH_MM => TreadStatus::Low,
            _ => TreadStatus::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WearPattern {
    Even,
    /// Centro más gastado que los bordes: sobrepresión.
    CenterWear,
    /// Ambos bordes más gastados: baja presión.
    EdgeWear,
    InnerEdgeWear,
    OuterEdgeWear,
    Unknown,
}

impl WearPattern {
    pub fn classify(inner: f32, center: f32, outer: f32) -> Self {
        if ![inner, center, outer].iter().all(|d| d.is_finite() && *d >= 0.0) {
            return WearPattern::Unknown;
        }
        if center + CENTER_EDGE_DELTA_MM < inner && center + CENTER_EDGE_DELTA_MM < outer {
            WearPattern::CenterWear
        } else if inner + CENTER_EDGE_DELTA_MM < center && outer + CENTER_EDGE_DELTA_MM < center {
            WearPattern::EdgeWear
        } else if outer - inner > SIDE_DELTA_MM {
            WearPattern::InnerEdgeWear
        } else if inner - outer > SIDE_DELTA_MM {
            WearPattern::OuterEdgeWear
        } else {
            WearPattern::Even
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreadMeasurement {
    pub inner_depth_mm: f32,
    pub center_depth_mm: f32,
    pub outer_depth_mm: f32,
    pub average_depth_mm: f32,
    pub minimum_depth_mm: f32,
    pub confidence: f32,
    pub wear_pattern: WearPattern,
    pub status: TreadStatus,
}

impl TreadMeasurement {
    /// Deriva media, mínimo, patrón y estado a partir de las tres lecturas.
    pub fn from_depths(inner: f32, center: f32, outer: f32, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 };
        let average = (inner + center + outer) / 3.0;
        let minimum = inner.min(center).min(outer);
        let status = if confidence == 0.0 || [inner, center, outer].iter().any(|d| !d.is_finite()) {
            TreadStatus::Unknown
        } else {
            TreadStatus::from_min_depth(minimum)
        };

        Self {
            inner_depth_mm: inner,
            center_depth_mm: center,
            outer_depth_mm: outer,
            average_depth_mm: average,
            minimum_depth_mm: minimum,
            confidence,
            wear_pattern: WearPattern::classify(inner, center, outer),
            status,
        }
    }
}
