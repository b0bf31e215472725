//! Post-procesado de la salida cruda del modelo: umbral de confianza,
//! conversión a píxeles y supresión de no-máximos (NMS).
//!
//! Cada fila del tensor tiene la forma
//! `[x_center, y_center, width, height, objectness, class_score_0..N]`
//! en coordenadas normalizadas [0,1] relativas a la imagen.

use tracing::debug;

use super::detection::{BoundingBox, Detection};
use super::model::DetectorParams;

#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
    pub objectness: f32,
    pub class_scores: Vec<f32>,
}

/// NaN/inf se convierten en 0 y todo se recorta a [0,1].
fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

impl RawCandidate {
    /// Interpreta una fila del tensor. Devuelve `None` si no hay al menos una clase.
    pub fn from_row(row: &[f32]) -> Option<Self> {
        if row.len() < 6 {
            return None;
        }
        Some(Self {
            cx: sanitize(row[0]),
            cy: sanitize(row[1]),
            w: sanitize(row[2]),
            h: sanitize(row[3]),
            objectness: sanitize(row[4]),
            class_scores: row[5..].iter().copied().map(sanitize).collect(),
        })
    }

    /// (índice de clase, objectness × mejor puntuación de clase)
    pub fn best_class(&self) -> Option<(usize, f32)> {
        self.class_scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((i, s)),
            })
            .map(|(i, s)| (i, self.objectness * s))
    }
}

/// Filtra por confianza y pasa a coordenadas de píxel recortadas a la imagen.
pub fn decode_candidates(
    candidates: &[RawCandidate],
    img_w: u32,
    img_h: u32,
    params: &DetectorParams,
) -> Vec<Detection> {
    let (fw, fh) = (img_w as f32, img_h as f32);

    candidates
        .iter()
        .filter_map(|c| {
            let (class_id, confidence) = c.best_class()?;
            if confidence < params.conf_threshold {
                return None;
            }
            let label = params
                .labels
                .get(class_id)
                .cloned()
                .unwrap_or_else(|| format!("class_{class_id}"));

            Some(Detection {
                label,
                class_id,
                confidence,
                bbox: BoundingBox::from_center(c.cx * fw, c.cy * fh, c.w * fw, c.h * fh, fw, fh),
            })
        })
        .collect()
}

/// NMS voraz: ordena por confianza descendente y descarta toda caja cuyo IoU
/// con una caja ya aceptada supere `iou_threshold`.
pub fn non_maximum_suppression(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    // sort_by es estable: empates conservan el orden de entrada
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut suppressed = vec![false; detections.len()];
    let mut keep = Vec::new();

    for i in 0..detections.len() {
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..detections.len() {
            if !suppressed[j] && detections[i].bbox.iou(&detections[j].bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }
        keep.push(i);
    }

    let mut slots: Vec<Option<Detection>> = detections.into_iter().map(Some).collect();
    keep.into_iter().filter_map(|i| slots[i].take()).collect()
}

/// Cadena completa: umbral, coordenadas, NMS y límite de detecciones.
pub fn postprocess(
    candidates: &[RawCandidate],
    img_w: u32,
    img_h: u32,
    params: &DetectorParams,
) -> Vec<Detection> {
    let decoded = decode_candidates(candidates, img_w, img_h, params);
    let before = decoded.len();
    let mut kept = non_maximum_suppression(decoded, params.iou_threshold);
    kept.truncate(params.max_detections);

    debug!(
        candidates = candidates.len(),
        above_threshold = before,
        kept = kept.len(),
        "post-procesado de detecciones"
    );
    kept
}
