use std::collections::HashSet;
use std::future::Future;

use crate::auth::token::Claims;

/// Authenticated principal and granted permissions for one inbound call.
///
/// Created once by the entry middleware, immutable for the lifetime of the
/// call, and visible only to code running inside that call's task-local scope.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub principal: String,
    pub permissions: HashSet<String>,
}

impl AuthContext {
    pub fn new(principal: impl Into<String>, permissions: impl IntoIterator<Item = String>) -> Self {
        Self {
            principal: principal.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub, claims.permissions)
    }
}

tokio::task_local! {
    static CURRENT: AuthContext;
}

/// Run `fut` with `ctx` as the ambient context for its full dynamic extent,
/// across every suspension point inside it. Concurrent calls each get their
/// own slot; nested establishment shadows the outer context until the inner
/// future completes.
pub async fn establish<F>(ctx: AuthContext, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(ctx, fut).await
}

/// The innermost active context, or `None` outside any `establish` scope.
pub fn current() -> Option<AuthContext> {
    CURRENT.try_with(|ctx| ctx.clone()).ok()
}
