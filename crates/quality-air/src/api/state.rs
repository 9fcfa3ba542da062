//! Application state shared across handlers.

use crate::config::ApiConfig;
use crate::user::UserService;

/// State handed to every handler. Cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    pub users: UserService,
    pub api: ApiConfig,
}

impl AppState {
    pub fn new(users: UserService, api: ApiConfig) -> Self {
        Self { users, api }
    }
}
