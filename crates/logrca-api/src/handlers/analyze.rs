use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::models::{AnalyzeLogsQuery, ApiError, ApiResult, SummaryResponse};
use crate::state::AppState;

/// GET /analyze_logs?service=<name>
// no time bounds: Loki applies its default range
pub async fn analyze_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeLogsQuery>,
) -> ApiResult<SummaryResponse> {
    let start = Instant::now();
    info!(service = %params.service, "ANALYZE request");

    let logs = state.logs.fetch_logs(&params.service, None, None).await;
    info!(service = %params.service, logs_found = logs.len(), "Logs retrieved from Loki");

    let summary = state.summarizer.summarize(&logs).await.map_err(|e| {
        error!(service = %params.service, error = %e, "Summary generation failed");
        ApiError::from_llm(&e)
    })?;

    info!(
        service = %params.service,
        time_ms = start.elapsed().as_millis() as u64,
        "ANALYZE complete"
    );

    Ok(Json(SummaryResponse { summary }))
}
