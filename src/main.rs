use std::path::PathBuf;
use std::sync::Arc;

use tyreguard_scoring::adapters::{
    http::{router, state::HttpState},
    onnx::model_catalog::OnnxModelCatalog,
};
use tyreguard_scoring::application::{detector::DefectDetector, services::TireAnalysisService};
use tyreguard_scoring::domain::model::AnalysisConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Inicializar logs (RUST_LOG=info por defecto)
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    // 2. Configuración: JSON opcional en TYREGUARD_CONFIG
    let config_path = std::env::var("TYREGUARD_CONFIG").ok().map(PathBuf::from);
    let config = AnalysisConfig::load(config_path.as_deref())?;
    tracing::info!("🔧 Configuración cargada ({})", config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "valores por defecto".into()));

    // 3. Modelo inyectado en el detector; sin modelo se usa la heurística
    let model = OnnxModelCatalog::new().load(config.model.as_ref(), &config.detector);
    let detector = Arc::new(DefectDetector::new(model, &config));

    // 4. Servicio de análisis y estado de la API
    let analysis = Arc::new(TireAnalysisService::new(detector, config.scoring.clone()));
    let state = HttpState {
        analysis,
        config: Arc::new(config),
    };

    // 5. Lanzar el Servidor
    let addr = std::env::var("TYREGUARD_ADDR").unwrap_or_else(|_| "0.0.0.0:8090".to_string());
    tracing::info!("🚀 Servidor de análisis iniciado en http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
