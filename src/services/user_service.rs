use std::sync::Arc;

use uuid::Uuid;

use crate::auth::guard;
use crate::error::ApiError;
use crate::store::{User, UserStore};

/// Business methods over the user collection.
///
/// Every privileged method checks its permission requirement first, before
/// touching the store; a denied check leaves no observable effect. Failures
/// propagate unhandled to the entry point.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        guard::require(&["user/read"])?;
        Ok(self.store.list().await)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, ApiError> {
        guard::require(&["user/read"])?;
        Ok(self.store.get(id).await?)
    }

    pub async fn create_user(&self, name: String, email: String) -> Result<User, ApiError> {
        guard::require(&["user/create"])?;
        validate_profile(&name, &email)?;
        Ok(self.store.insert(name, email).await?)
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        name: String,
        email: String,
    ) -> Result<User, ApiError> {
        guard::require(&["user/update"])?;
        validate_profile(&name, &email)?;
        Ok(self.store.update(id, name, email).await?)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<User, ApiError> {
        guard::require(&["user/delete"])?;
        let user = self.store.delete(id).await?;
        tracing::info!(user_id = %user.id, "user deleted");
        Ok(user)
    }
}

fn validate_profile(name: &str, email: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::bad_request("Name must not be empty"));
    }
    if !email.contains('@') {
        return Err(ApiError::bad_request("Email address is not valid"));
    }
    Ok(())
}
