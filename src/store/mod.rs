use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
}

/// Persistence seam for the user collection. The API is storage-agnostic;
/// swap in a database-backed implementation without touching services.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Vec<User>;
    async fn get(&self, id: Uuid) -> Result<User, StoreError>;
    async fn insert(&self, name: String, email: String) -> Result<User, StoreError>;
    async fn update(&self, id: Uuid, name: String, email: String) -> Result<User, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<User, StoreError>;
}

/// In-memory store used by the boilerplate and its tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Vec<User> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        all
    }

    async fn get(&self, id: Uuid) -> Result<User, StoreError> {
        let users = self.users.read().await;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user '{}' not found", id)))
    }

    async fn insert(&self, name: String, email: String) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::Conflict(format!(
                "email '{}' is already registered",
                email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, name: String, email: String) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email && u.id != id) {
            return Err(StoreError::Conflict(format!(
                "email '{}' is already registered",
                email
            )));
        }

        let user = users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user '{}' not found", id)))?;
        user.name = name;
        user.email = email;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        users
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user '{}' not found", id)))
    }
}
