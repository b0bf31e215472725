use base64::{prelude::BASE64_STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::{DomainError, DomainResult},
    model::AnalysisConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Imagen del dibujo en base64 (JPEG/PNG).
    pub tread_image: String,
    pub sidewall_image: Option<String>,
    /// Lecturas del profundímetro: interior, centro, exterior (mm).
    pub tread_depths_mm: Option<[f32; 3]>,
    /// Texto del código DOT tecleado por el usuario.
    pub dot_code: Option<String>,
}

pub struct DecodedImages {
    pub tread: Vec<u8>,
    pub sidewall: Option<Vec<u8>>,
}

fn decode_b64(field: &str, data: &str) -> DomainResult<Vec<u8>> {
    // admite data URLs: "data:image/jpeg;base64,...."
    let payload = data.split_once(',').map(|(_, p)| p).unwrap_or(data);
    BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| DomainError::InvalidInput(format!("{field}: base64 inválido ({e})")))
}

impl AnalyzeRequest {
    pub fn decode_images(&self) -> DomainResult<DecodedImages> {
        Ok(DecodedImages {
            tread: decode_b64("tread_image", &self.tread_image)?,
            sidewall: self
                .sidewall_image
                .as_deref()
                .map(|s| decode_b64("sidewall_image", s))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub model_loaded: bool,
    pub config: AnalysisConfig,
}
