//! User service for business logic.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use super::models::{LoginStatus, User};
use super::repository::UserRepository;

/// Nickname of the account created at startup.
pub const DEFAULT_ADMIN_NICK_NAME: &str = "admin";

/// Service for user management operations.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Insert the default admin account.
    ///
    /// Runs unconditionally: calling it against a database that already holds
    /// the admin adds another copy.
    #[instrument(skip(self))]
    pub async fn initialize_defaults(&self) -> Result<User> {
        let admin = self.repo.save(default_admin()).await?;
        info!(user_id = ?admin.id, "Seeded default admin user");
        Ok(admin)
    }

    /// Insert the default admin account unless a user with its nickname exists.
    #[instrument(skip(self))]
    pub async fn initialize_defaults_once(&self) -> Result<Option<User>> {
        if self.repo.exists_by_nick_name(DEFAULT_ADMIN_NICK_NAME).await? {
            info!("Default admin user already present, skipping seed");
            return Ok(None);
        }
        self.initialize_defaults().await.map(Some)
    }

    /// Create a new user. The store assigns the id.
    #[instrument(skip(self, user), fields(nick_name = %user.nick_name))]
    pub async fn insert(&self, user: User) -> Result<User> {
        if user.id.is_some() {
            warn!(id = ?user.id, "Insert called with an explicit id; it will overwrite that row");
        }
        let user = self.repo.save(user).await?;
        info!(user_id = ?user.id, "Created new user");
        Ok(user)
    }

    /// Replace the stored record keyed by `user.id` with `user`.
    #[instrument(skip(self, user), fields(id = ?user.id))]
    pub async fn update(&self, user: User) -> Result<User> {
        let user = self.repo.save(user).await?;
        info!(user_id = ?user.id, "Updated user");
        Ok(user)
    }

    /// List active users.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<User>> {
        self.repo.find_active().await
    }

    /// Get a user by ID.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Check credentials. `identifier` may be an email or a nickname.
    #[instrument(skip(self, password))]
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginStatus> {
        let status = match self
            .repo
            .find_by_identifier_and_password(identifier, password)
            .await?
        {
            Some(_) => LoginStatus::ValidPassword,
            None => LoginStatus::InvalidPassword,
        };
        info!(%status, "Login attempt");
        Ok(status)
    }
}

/// The admin account inserted at startup.
pub fn default_admin() -> User {
    User {
        id: None,
        name: Some("Admin".to_string()),
        last_name: Some("Admin".to_string()),
        dni: "12345678".to_string(),
        date: NaiveDate::from_ymd_opt(2012, 10, 28),
        email: "admin@correo.com".to_string(),
        nick_name: DEFAULT_ADMIN_NICK_NAME.to_string(),
        password: "admin".to_string(),
        status: true,
    }
}
