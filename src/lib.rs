//! Puntuación de salud de neumáticos: detección de defectos (modelo ONNX o
//! heurística de respaldo), medición del dibujo, edad por código DOT, fusión
//! ponderada y tabla de recomendaciones.

pub mod adapters;
pub mod application;
pub mod domain;

pub use crate::application::services::TireAnalysisService;
pub use crate::domain::analysis::ComprehensiveTireAnalysis;
pub use crate::domain::model::AnalysisConfig;
