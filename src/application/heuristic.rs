//! Analizador de respaldo cuando no hay modelo cargado.
//!
//! Es una aproximación: tres estadísticas sobre una miniatura en escala de
//! grises (brillo medio, intensidad de bordes y varianza). Cada umbral
//! superado resta puntos y añade una sospecha de defecto con confianza baja
//! (<= 0.4). Nunca sustituye al modelo; sólo evita que el análisis falle.

use image::{imageops::FilterType, DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::defect::{DefectType, TireDefect};
use crate::domain::model::HeuristicParams;

const BALD_SPOT_CONFIDENCE: f32 = 0.25;
const CRACK_CONFIDENCE: f32 = 0.35;
const UNEVEN_WEAR_CONFIDENCE: f32 = 0.30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImageStats {
    pub brightness: f32,
    /// Media por píxel de |Δx| + |Δy| entre vecinos.
    pub edge_intensity: f32,
    pub variance: f32,
}

impl ImageStats {
    pub fn from_gray(gray: &GrayImage) -> Self {
        let (w, h) = gray.dimensions();
        let n = (w * h).max(1) as f32;
        let px = |x: u32, y: u32| gray.get_pixel(x, y)[0] as f32;

        let brightness = gray.pixels().map(|p| p[0] as f32).sum::<f32>() / n;
        let variance = gray
            .pixels()
            .map(|p| {
                let d = p[0] as f32 - brightness;
                d * d
            })
            .sum::<f32>()
            / n;

        let mut edges = 0.0;
        for y in 0..h {
            for x in 0..w {
                let c = px(x, y);
                if x + 1 < w {
                    edges += (px(x + 1, y) - c).abs();
                }
                if y + 1 < h {
                    edges += (px(x, y + 1) - c).abs();
                }
            }
        }

        Self { brightness, edge_intensity: edges / n, variance }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicReport {
    pub score: u8,
    pub stats: ImageStats,
    pub defects: Vec<TireDefect>,
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicAnalyzer {
    params: HeuristicParams,
    downgrade_below: f32,
}

impl HeuristicAnalyzer {
    pub fn new(params: HeuristicParams, downgrade_below: f32) -> Self {
        Self { params, downgrade_below }
    }

    pub fn analyze(&self, image: &DynamicImage) -> HeuristicReport {
        let n = self.params.sample_size;
        let gray = image.resize_exact(n, n, FilterType::Triangle).to_luma8();
        let stats = ImageStats::from_gray(&gray);

        let p = &self.params;
        let mut score: i32 = 100;
        let mut defects = Vec::new();

        let mut flag = |hit: bool, penalty: u8, kind: DefectType, confidence: f32| {
            if hit {
                score -= penalty as i32;
                defects.push(TireDefect::new(kind, confidence, None, self.downgrade_below));
            }
        };
        flag(
            stats.brightness > p.bright_threshold,
            p.bright_penalty,
            DefectType::BaldSpot,
            BALD_SPOT_CONFIDENCE,
        );
        flag(
            stats.edge_intensity > p.edge_threshold,
            p.edge_penalty,
            DefectType::Crack,
            CRACK_CONFIDENCE,
        );
        flag(
            stats.variance > p.variance_threshold,
            p.variance_penalty,
            DefectType::UnevenWear,
            UNEVEN_WEAR_CONFIDENCE,
        );

        let score = score.clamp(0, 100) as u8;
        debug!(
            brightness = stats.brightness,
            edges = stats.edge_intensity,
            variance = stats.variance,
            score,
            guesses = defects.len(),
            "análisis heurístico"
        );

        HeuristicReport { score, stats, defects }
    }
}
