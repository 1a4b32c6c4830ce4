//! Dashboard statistics

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::DashboardStats;
use crate::interfaces::http::common::{ApiResponse, ApiResult};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_students: u64,
    pub total_certificates: u64,
    pub pending_certificates: u64,
    pub issued_certificates: u64,
    pub revoked_certificates: u64,
    pub expired_certificates: u64,
}

impl From<DashboardStats> for StatsDto {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_students: s.total_students,
            total_certificates: s.total_certificates,
            pending_certificates: s.pending_certificates,
            issued_certificates: s.issued_certificates,
            revoked_certificates: s.revoked_certificates,
            expired_certificates: s.expired_certificates,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Aggregate counts", body = ApiResponse<StatsDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<ApiResponse<StatsDto>>> {
    let stats = state.dashboard.stats().await?;
    Ok(Json(ApiResponse::success(StatsDto::from(stats))))
}
