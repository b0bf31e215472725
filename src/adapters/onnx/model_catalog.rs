use std::path::Path;
use tracing::{info, warn};

use crate::adapters::onnx::defect_engine::OnnxDefectEngine;
use crate::application::ports::DefectModelPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::{DetectorParams, ModelId};

pub struct OnnxModelCatalog;

impl OnnxModelCatalog {
    pub fn new() -> Self { Self }

    pub fn validate_model(&self, model: &ModelId) -> DomainResult<()> {
        if model.onnx_path.trim().is_empty() {
            return Err(DomainError::InvalidInput("onnx_path empty".into()));
        }
        if !Path::new(&model.onnx_path).exists() {
            return Err(DomainError::NotFound(format!("model file not found: {}", model.onnx_path)));
        }
        Ok(())
    }

    /// Carga el modelo configurado. Cualquier fallo deja el detector sin
    /// modelo, lo que activa el analizador heurístico.
    pub fn load(&self, model: Option<&ModelId>, params: &DetectorParams) -> Option<Box<dyn DefectModelPort>> {
        let Some(model) = model else {
            info!("Sin modelo configurado: se usará el analizador heurístico");
            return None;
        };

        if let Err(e) = self.validate_model(model) {
            warn!("Modelo {} no válido ({}), se usará el analizador heurístico", model.name, e);
            return None;
        }

        match OnnxDefectEngine::load(&model.name, &model.onnx_path, params.input_size) {
            Ok(engine) => {
                info!("✅ Modelo {} cargado desde {}", model.name, model.onnx_path);
                Some(Box::new(engine))
            }
            Err(e) => {
                warn!("Error cargando modelo {}: {:?}", model.name, e);
                None
            }
        }
    }
}

impl Default for OnnxModelCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_invalid() {
        let m = ModelId { name: "x".into(), onnx_path: "  ".into() };
        assert!(matches!(OnnxModelCatalog::new().validate_model(&m), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn missing_file_falls_back_to_no_model() {
        let m = ModelId { name: "x".into(), onnx_path: "/definitely/not/here.onnx".into() };
        let catalog = OnnxModelCatalog::new();
        assert!(matches!(catalog.validate_model(&m), Err(DomainError::NotFound(_))));
        assert!(catalog.load(Some(&m), &DetectorParams::default()).is_none());
        assert!(catalog.load(None, &DetectorParams::default()).is_none());
    }
}
