use std::sync::Arc;
use crate::application::services::TireAnalysisService;
use crate::domain::model::AnalysisConfig;

/// Estado compartido para los manejadores HTTP de Axum.
/// Siguiendo la Arquitectura Hexagonal, el estado contiene los servicios (Casos de Uso).
#[derive(Clone)]
pub struct HttpState {
    /// Servicio de análisis sin proveedores de medición; cada petición añade los suyos.
    pub analysis: Arc<TireAnalysisService>,
    /// Configuración activa, expuesta en /api/config.
    pub config: Arc<AnalysisConfig>,
}
