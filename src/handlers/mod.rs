pub mod session;
pub mod users;

use crate::services::UserService;

/// Shared application state, built once in `main` and injected through the
/// router. Services are wired explicitly here rather than resolved ambiently.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}
