use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::adapters::http::state::HttpState;
use crate::adapters::manual::{dot_code::DotCodeSidewall, tread_gauge::ManualTreadGauge};
use crate::application::dto::{AnalyzeRequest, ConfigResponse};
use crate::domain::analysis::ComprehensiveTireAnalysis;

pub async fn get_config(State(st): State<HttpState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        model_loaded: st.analysis.detector().has_model(),
        config: (*st.config).clone(),
    })
}

/// Ejecuta el análisis en un hilo bloqueante: es cálculo puro y no debe
/// ocupar el runtime de Tokio.
pub async fn run_analysis(
    st: &HttpState,
    req: AnalyzeRequest,
) -> Result<ComprehensiveTireAnalysis, (StatusCode, String)> {
    let images = req
        .decode_images()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut service = (*st.analysis).clone();
    if let Some([inner, center, outer]) = req.tread_depths_mm {
        service = service.with_tread_provider(Arc::new(ManualTreadGauge::new(inner, center, outer)));
    }
    if let Some(code) = req.dot_code {
        service = service.with_sidewall_provider(Arc::new(DotCodeSidewall::new(code)));
    }

    tokio::task::spawn_blocking(move || service.analyze(&images.tread, images.sidewall.as_deref()))
        .await
        .map_err(|e| {
            error!("Análisis abortado: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

pub async fn analyze(State(st): State<HttpState>, Json(req): Json<AnalyzeRequest>) -> impl IntoResponse {
    match run_analysis(&st, req).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err((status, msg)) => (status, Json(json!({ "error": msg }))).into_response(),
    }
}
