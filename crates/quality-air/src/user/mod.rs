//! User management module.
//!
//! Provides persistence, business logic and credential checks for the
//! `user` table.

mod models;
mod repository;
mod service;

pub use models::{LoginQuery, LoginResponse, LoginStatus, User};
pub use repository::UserRepository;
pub use service::{DEFAULT_ADMIN_NICK_NAME, UserService, default_admin};
