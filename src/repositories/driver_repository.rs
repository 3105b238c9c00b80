use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::driver_dto::{DriverFilters, DriverStatsResponse, UpdateDriverRequest};
use crate::models::driver::{Driver, DriverStatus};
use crate::utils::errors::AppError;

const FK_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        id_card: String,
        license: String,
        phone: Option<String>,
    ) -> Result<Driver, AppError> {
        let id = Uuid::new_v4();

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, name, id_card, license, phone, status, total_hours, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(id_card)
        .bind(license)
        .bind(phone)
        .bind(DriverStatus::Active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("La cédula ya está registrada".to_string())
            }
            _ => AppError::from_sqlx(e),
        })?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(driver)
    }

    /// Listar choferes con filtro de estado y búsqueda por nombre/cédula/licencia
    pub async fn list(&self, filters: &DriverFilters) -> Result<Vec<Driver>, AppError> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE ($1::driver_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR id_card ILIKE $2 OR license ILIKE $2)
            ORDER BY name
            "#,
        )
        .bind(filters.status)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(drivers)
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> Result<Driver, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Chofer no encontrado".to_string()))?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, id_card = $3, license = $4, phone = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.unwrap_or(current.name))
        .bind(request.id_card.unwrap_or(current.id_card))
        .bind(request.license.unwrap_or(current.license))
        .bind(request.phone.or(current.phone))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("La cédula ya está registrada".to_string())
            }
            _ => AppError::from_sqlx(e),
        })?;

        Ok(driver)
    }

    /// Desactivar chofer (no participa en nuevos viajes)
    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE drivers SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(DriverStatus::Inactive)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Chofer no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(FK_VIOLATION) => {
                    AppError::Conflict(
                        "No se puede eliminar el chofer porque tiene viajes asociados".to_string(),
                    )
                }
                _ => AppError::from_sqlx(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Chofer no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn stats(&self, id: Uuid) -> Result<DriverStatsResponse, AppError> {
        let driver = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Chofer no encontrado".to_string()))?;

        let (completed_trips,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM trips WHERE driver_id = $1 AND status = 'completed'",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(DriverStatsResponse {
            driver,
            completed_trips,
        })
    }

    // --- Operaciones dentro de transacción ---

    pub async fn find_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(driver)
    }

    /// Acreditar horas trabajadas al completar un viaje.
    /// Las horas acumuladas solo crecen y solo por esta vía.
    pub async fn add_hours(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        hours: f64,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE drivers SET total_hours = total_hours + $2 WHERE id = $1")
            .bind(id)
            .bind(hours)
            .execute(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(())
    }
}
