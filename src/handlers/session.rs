use serde_json::{json, Value};

use crate::auth::context;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/whoami - echo the authenticated principal and granted permissions
pub async fn whoami() -> ApiResult<Value> {
    let ctx = context::current()
        .ok_or_else(|| ApiError::unauthorized("No authenticated principal in scope"))?;

    let mut permissions: Vec<String> = ctx.permissions.iter().cloned().collect();
    permissions.sort();

    Ok(ApiResponse::success(json!({
        "principal": ctx.principal,
        "permissions": permissions,
    })))
}
