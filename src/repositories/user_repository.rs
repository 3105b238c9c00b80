use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{User, UserRole, UserStatus};
use crate::utils::errors::AppError;

const UNIQUE_VIOLATION: &str = "23505";

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        full_name: String,
        email: String,
        password_hash: String,
        role: UserRole,
    ) -> Result<User, AppError> {
        let id = Uuid::new_v4();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, role, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(UserStatus::Active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("El email ya está registrado".to_string())
            }
            _ => AppError::from_sqlx(e),
        })?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(user)
    }

    /// Buscar usuario activo por email (para login)
    pub async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 AND status = $2")
                .bind(email)
                .bind(UserStatus::Active)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from_sqlx)?;

        Ok(user)
    }

    pub async fn touch_last_access(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_access = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(())
    }
}
