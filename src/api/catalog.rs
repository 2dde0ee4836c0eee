//! Catalog consistency endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::catalog::Violation};

#[derive(Serialize, ToSchema)]
pub struct AuditResponse {
    /// True when no relationship invariant is broken
    pub consistent: bool,
    pub violations: Vec<Violation>,
}

/// Check every relationship invariant
#[utoipa::path(
    get,
    path = "/catalog/audit",
    tag = "catalog",
    responses(
        (status = 200, description = "Audit result", body = AuditResponse)
    )
)]
pub async fn audit(State(state): State<crate::AppState>) -> AppResult<Json<AuditResponse>> {
    let violations = state.services.catalog.audit().await?;
    Ok(Json(AuditResponse {
        consistent: violations.is_empty(),
        violations,
    }))
}
