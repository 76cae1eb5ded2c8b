use crate::error::{ApiError, ApiResult};
use crate::rate_limit::client_key;
use crate::AppState;
use axum::{extract::State, http::HeaderMap, Json};
use cxaudit_core::{resolve, Audit};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string(),
    })
}

/// POST /api/generate-audit with body `{ "company": { "id": "..." } }`.
///
/// The id is the only client input; everything else about the company
/// comes from the server-side allow-list, so the fetchers never see a
/// client-supplied URL. Validation happens before any outbound call.
pub async fn generate_audit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Audit>> {
    let key = client_key(&headers);
    if !state.limiter.allow(&key) {
        return Err(ApiError::RateLimited);
    }

    let id = body
        .get("company")
        .and_then(|c| c.get("id"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| ApiError::BadRequest("Missing company data".to_string()))?;

    let company =
        resolve(id).ok_or_else(|| ApiError::BadRequest(format!("Unknown company: {}", id)))?;

    let audit = state.pipeline.generate(company).await?;
    Ok(Json(audit))
}
