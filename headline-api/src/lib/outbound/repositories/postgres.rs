use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Transaction;
use uuid::Uuid;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL user store.
///
/// Writes run in their own transaction, which is rolled back explicitly
/// before the error is returned.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, UserError> {
        self.pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(&row.username)?,
            email: EmailAddress::new(&row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

/// Map a failed write to a domain error, naming the violated unique column.
fn write_error(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some(USERNAME_CONSTRAINT) {
                return UserError::UsernameAlreadyExists(user.username.to_string());
            }
            if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
                return UserError::EmailAlreadyExists(user.email.to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

async fn rollback(transaction: Transaction<'static, Postgres>) {
    if let Err(e) = transaction.rollback().await {
        tracing::error!(error = %e, "Transaction rollback failed");
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut transaction = self.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.modified_at)
        .execute(&mut *transaction)
        .await;

        if let Err(e) = inserted {
            rollback(transaction).await;
            let error = write_error(e, &user);
            tracing::warn!(username = %user.username, error = %error, "User insert rolled back");
            return Err(error);
        }

        transaction
            .commit()
            .await
            .map_err(|e| write_error(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, modified_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, modified_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, modified_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn save(&self, user: User) -> Result<User, UserError> {
        let mut transaction = self.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, modified_at = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.modified_at)
        .execute(&mut *transaction)
        .await;

        let result = match updated {
            Ok(result) => result,
            Err(e) => {
                rollback(transaction).await;
                return Err(write_error(e, &user));
            }
        };

        if result.rows_affected() == 0 {
            rollback(transaction).await;
            return Err(UserError::NotFound(user.id.to_string()));
        }

        transaction
            .commit()
            .await
            .map_err(|e| write_error(e, &user))?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::DatabaseError;
    use sqlx::error::ErrorKind;

    use super::*;

    #[derive(Debug)]
    struct FakeDatabaseError {
        unique_violation: bool,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for FakeDatabaseError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "database rejected the write")
        }
    }

    impl StdError for FakeDatabaseError {}

    impl DatabaseError for FakeDatabaseError {
        fn message(&self) -> &str {
            "database rejected the write"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            if self.unique_violation {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::CheckViolation
            }
        }
    }

    fn database_error(unique_violation: bool, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDatabaseError {
            unique_violation,
            constraint,
        }))
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: Username::new("proton").unwrap(),
            email: EmailAddress::new("proton@andela.com").unwrap(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: now,
            modified_at: now,
        }
    }

    #[test]
    fn test_username_constraint_is_conflict() {
        let error = write_error(
            database_error(true, Some(USERNAME_CONSTRAINT)),
            &user(),
        );

        assert!(matches!(error, UserError::UsernameAlreadyExists(ref name) if name == "proton"));
    }

    #[test]
    fn test_email_constraint_is_conflict() {
        let error = write_error(
            database_error(true, Some(EMAIL_CONSTRAINT)),
            &user(),
        );

        assert!(matches!(error, UserError::EmailAlreadyExists(_)));
    }

    #[test]
    fn test_other_failures_are_database_errors() {
        let unknown_constraint = write_error(
            database_error(true, Some("users_pkey")),
            &user(),
        );
        let check_violation = write_error(
            database_error(false, Some(USERNAME_CONSTRAINT)),
            &user(),
        );
        let pool_closed = write_error(sqlx::Error::PoolClosed, &user());

        assert!(matches!(unknown_constraint, UserError::DatabaseError(_)));
        assert!(matches!(check_violation, UserError::DatabaseError(_)));
        assert!(matches!(pool_closed, UserError::DatabaseError(_)));
    }
}
