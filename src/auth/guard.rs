use crate::auth::context;
use crate::error::ApiError;

/// Check the ambient context against a required permission set.
///
/// Call this at the top of every privileged operation, before any state is
/// touched. All listed permissions must be granted (logical AND); a failed
/// check names exactly the missing ones, in the order they were required.
pub fn require(required: &[&str]) -> Result<(), ApiError> {
    let ctx = context::current()
        .ok_or_else(|| ApiError::unauthorized("No authenticated principal in scope"))?;

    let missing: Vec<String> = required
        .iter()
        .filter(|p| !ctx.has_permission(p))
        .map(|p| p.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::warn!(
            principal = %ctx.principal,
            missing = ?missing,
            "permission check failed"
        );
        Err(ApiError::access_denied(missing))
    }
}
