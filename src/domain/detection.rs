use serde::{Deserialize, Serialize};

/// Rectángulo alineado con los ejes, en píxeles de la imagen original.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    /// Construye la caja a partir de centro/tamaño y la recorta a la imagen.
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32, img_w: f32, img_h: f32) -> Self {
        Self {
            x1: (cx - w / 2.0).clamp(0.0, img_w),
            y1: (cy - h / 2.0).clamp(0.0, img_h),
            x2: (cx + w / 2.0).clamp(0.0, img_w),
            y2: (cy + h / 2.0).clamp(0.0, img_h),
        }
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);

        let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        let union = self.area() + other.area() - intersection;

        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub class_id: usize,
    pub confidence: f32,
    pub bbox: BoundingBox,
}
