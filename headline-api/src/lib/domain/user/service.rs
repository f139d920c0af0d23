use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for registration, login and identity resolution.
///
/// Argon2 work runs on the blocking pool; token checks stay inline.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token codec, already configured
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn check_password(&self, user: &User, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let subject = user.id.to_string();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        result.map_err(|e| match e {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => UserError::Password(err),
            AuthenticationError::TokenError(err) => UserError::Token(err),
        })
    }

    /// Replace a hash made under older cost settings. Failures only cost the upgrade.
    async fn upgrade_password_hash(&self, mut user: User, password: String) {
        let password_hash = match self.hash_password(password).await {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password rehash failed");
                return;
            }
        };

        user.password_hash = password_hash;
        user.modified_at = Utc::now();

        match self.repository.save(user).await {
            Ok(saved) => tracing::info!(user_id = %saved.id, "Password hash upgraded"),
            Err(e) => tracing::warn!(error = %e, "Failed to store upgraded password hash"),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Registration, UserError> {
        if self
            .repository
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: now,
            modified_at: now,
        };

        // A concurrent registration can still win between the checks above and
        // this insert; the repository reports that as the same conflict.
        let created_user = self.repository.create(user).await?;

        let token = self
            .authenticator
            .issue_token(&created_user.id.to_string())?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(Registration {
            user: created_user,
            token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let Some(user) = self
            .repository
            .find_by_username(&command.username)
            .await?
        else {
            tracing::debug!("Login attempt for unknown username");
            return Err(UserError::InvalidCredentials);
        };

        let token = self.check_password(&user, command.password.clone()).await?;

        if self.authenticator.needs_rehash(&user.password_hash) {
            self.upgrade_password_hash(user, command.password).await;
        }

        Ok(token)
    }

    async fn resolve_identity(&self, token: &str) -> Result<User, UserError> {
        let subject = self.authenticator.validate_token(token)?;

        let user_id = UserId::from_string(&subject).map_err(|_| UserError::InvalidToken)?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or(UserError::NotFound(subject))
    }
}
