use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::trip_dto::TripFilters;
use crate::models::trip::{Trip, TripListRow, TripStatus};
use crate::utils::errors::AppError;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(trip)
    }

    /// Listado con joins de placa, chofer y ruta
    pub async fn list(&self, filters: &TripFilters) -> Result<Vec<TripListRow>, AppError> {
        let trips = sqlx::query_as::<_, TripListRow>(
            r#"
            SELECT
                t.id,
                t.date,
                t.start_time,
                t.end_time,
                t.status,
                d.name AS driver_name,
                v.plate AS vehicle_plate,
                r.name AS route_name
            FROM trips t
            JOIN drivers d ON t.driver_id = d.id
            JOIN vehicles v ON t.vehicle_id = v.id
            JOIN routes r ON t.route_id = r.id
            WHERE ($1::trip_status IS NULL OR t.status = $1)
              AND ($2::uuid IS NULL OR t.vehicle_id = $2)
              AND ($3::uuid IS NULL OR t.driver_id = $3)
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.vehicle_id)
        .bind(filters.driver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(trips)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Viaje no encontrado".to_string()));
        }

        Ok(())
    }

    // --- Operaciones dentro de transacción (controlador de ciclo de vida) ---

    pub async fn find_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(trip)
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        vehicle_id: Uuid,
        driver_id: Uuid,
        route_id: Uuid,
        date: NaiveDate,
        cargo: Option<String>,
    ) -> Result<Trip, AppError> {
        let id = Uuid::new_v4();

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, vehicle_id, driver_id, route_id, date, status, cargo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(route_id)
        .bind(date)
        .bind(TripStatus::Programmed)
        .bind(cargo)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(trip)
    }

    pub async fn mark_started(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        start_time: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE trips SET status = $2, start_time = $3 WHERE id = $1")
            .bind(id)
            .bind(TripStatus::InProgress)
            .bind(start_time)
            .execute(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn mark_completed(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        fuel_used: Decimal,
        final_odometer: i64,
        notes: Option<String>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE trips
            SET status = $2, start_time = $3, end_time = $4,
                fuel_used = $5, final_odometer = $6, notes = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(TripStatus::Completed)
        .bind(start_time)
        .bind(end_time)
        .bind(fuel_used)
        .bind(final_odometer)
        .bind(notes)
        .execute(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(())
    }

    pub async fn mark_cancelled(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        notes: Option<String>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE trips SET status = $2, notes = COALESCE($3, notes) WHERE id = $1")
            .bind(id)
            .bind(TripStatus::Cancelled)
            .bind(notes)
            .execute(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(())
    }
}
