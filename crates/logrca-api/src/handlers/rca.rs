use axum::{
    Json,
    extract::{Query, State},
};
use logrca_core::{RcaReport, RcaRequest};
use logrca_rag::RcaError;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::models::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /chat_rca?question=<text>
pub async fn chat_rca(
    State(state): State<Arc<AppState>>,
    Query(req): Query<RcaRequest>,
) -> ApiResult<RcaReport> {
    let start = Instant::now();
    info!(question = %req.question, "RCA request");

    let report = state.rca_engine.analyze(&req.question).await.map_err(|e| {
        match &e {
            RcaError::Llm(_) => warn!(error = %e, "RCA model call failed"),
            _ => info!(reason = %e, "RCA request not answerable"),
        }
        ApiError::from_rca(&e)
    })?;

    info!(
        service = %report.service,
        time_ms = start.elapsed().as_millis() as u64,
        "RCA complete"
    );

    Ok(Json(report))
}
