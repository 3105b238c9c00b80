use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::maintenance_dto::{MaintenanceFilters, MaintenanceStats};
use crate::models::maintenance::{Maintenance, MaintenanceStatus};
use crate::utils::errors::AppError;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Maintenance>, AppError> {
        let maintenance =
            sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenance_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from_sqlx)?;

        Ok(maintenance)
    }

    pub async fn list(&self, filters: &MaintenanceFilters) -> Result<Vec<Maintenance>, AppError> {
        let maintenance = sqlx::query_as::<_, Maintenance>(
            r#"
            SELECT * FROM maintenance_records
            WHERE ($1::maintenance_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR vehicle_id = $2)
              AND ($3::text IS NULL OR kind = $3)
            ORDER BY date DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.vehicle_id)
        .bind(filters.kind.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(maintenance)
    }

    /// Historial de mantenimiento de un vehículo
    pub async fn history_for_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Maintenance>, AppError> {
        let maintenance = sqlx::query_as::<_, Maintenance>(
            "SELECT * FROM maintenance_records WHERE vehicle_id = $1 ORDER BY date DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(maintenance)
    }

    pub async fn stats(&self) -> Result<MaintenanceStats, AppError> {
        let stats = sqlx::query_as::<_, MaintenanceStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'scheduled') AS scheduled,
                COALESCE(SUM(cost), 0) AS total_cost,
                COALESCE(AVG(cost), 0) AS average_cost
            FROM maintenance_records
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(stats)
    }

    /// Editar un mantenimiento aún programado.
    /// Sobre un registro completado responde 409, no se reescribe historial.
    pub async fn update(
        &self,
        id: Uuid,
        date: Option<NaiveDate>,
        kind: Option<String>,
        description: Option<String>,
        cost: Option<Decimal>,
    ) -> Result<Maintenance, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;

        if current.status != MaintenanceStatus::Scheduled {
            return Err(AppError::PreconditionFailed(
                "Solo se puede editar un mantenimiento programado".to_string(),
            ));
        }

        let maintenance = sqlx::query_as::<_, Maintenance>(
            r#"
            UPDATE maintenance_records
            SET date = COALESCE($2, date),
                kind = COALESCE($3, kind),
                description = COALESCE($4, description),
                cost = COALESCE($5, cost)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(date)
        .bind(kind)
        .bind(description)
        .bind(cost)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(maintenance)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Mantenimiento no encontrado".to_string()));
        }

        Ok(())
    }

    // --- Operaciones dentro de transacción (controlador de ciclo de vida) ---

    pub async fn find_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Maintenance>, AppError> {
        let maintenance = sqlx::query_as::<_, Maintenance>(
            "SELECT * FROM maintenance_records WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(maintenance)
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        vehicle_id: Uuid,
        date: NaiveDate,
        kind: String,
        description: String,
        cost: Decimal,
    ) -> Result<Maintenance, AppError> {
        let id = Uuid::new_v4();

        let maintenance = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenance_records (id, vehicle_id, date, kind, description, cost, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(date)
        .bind(kind)
        .bind(description)
        .bind(cost)
        .bind(MaintenanceStatus::Scheduled)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(maintenance)
    }

    pub async fn mark_completed(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        cost: Option<Decimal>,
        description: Option<String>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE maintenance_records
            SET status = $2,
                cost = COALESCE($3, cost),
                description = COALESCE($4, description),
                completed_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(MaintenanceStatus::Completed)
        .bind(cost)
        .bind(description)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(())
    }
}
