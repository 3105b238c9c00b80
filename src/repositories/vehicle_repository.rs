use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::vehicle_dto::{UpdateVehicleRequest, VehicleFilters, VehicleStatsResponse};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::AppError;

/// Código SQLSTATE de violación de foreign key
const FK_VIOLATION: &str = "23503";
/// Código SQLSTATE de violación de unique
const UNIQUE_VIOLATION: &str = "23505";

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        plate: String,
        model: String,
        kind: String,
        odometer: i64,
        service_limit: i64,
    ) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, model, kind, odometer, service_limit, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate)
        .bind(model)
        .bind(kind)
        .bind(odometer)
        .bind(service_limit)
        .bind(VehicleStatus::Available)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("La placa ya está registrada".to_string())
            }
            _ => AppError::from_sqlx(e),
        })?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(vehicle)
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = match filters.status {
            Some(status) => {
                sqlx::query_as::<_, Vehicle>(
                    "SELECT * FROM vehicles WHERE status = $1 ORDER BY plate",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY plate")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(AppError::from_sqlx)?;

        Ok(vehicles)
    }

    /// Actualizar campos descriptivos. El estado y el kilometraje NO se
    /// actualizan por aquí: son propiedad de los controladores de ciclo de vida.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, model = $3, kind = $4, service_limit = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.plate.unwrap_or(current.plate))
        .bind(request.model.unwrap_or(current.model))
        .bind(request.kind.unwrap_or(current.kind))
        .bind(request.service_limit.unwrap_or(current.service_limit))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("La placa ya está registrada".to_string())
            }
            _ => AppError::from_sqlx(e),
        })?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(FK_VIOLATION) => {
                    AppError::Conflict(
                        "No se puede eliminar el vehículo porque tiene viajes asociados"
                            .to_string(),
                    )
                }
                _ => AppError::from_sqlx(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }

    /// Estadísticas de uso: viajes completados, combustible total, km restantes
    pub async fn stats(&self, id: Uuid) -> Result<VehicleStatsResponse, AppError> {
        let vehicle = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let (total_trips, total_fuel): (i64, Option<Decimal>) = sqlx::query_as(
            r#"
            SELECT COUNT(*), SUM(fuel_used)
            FROM trips
            WHERE vehicle_id = $1 AND status = 'completed'
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        let km_remaining = vehicle.remaining_km();

        Ok(VehicleStatsResponse {
            vehicle,
            total_trips,
            total_fuel: total_fuel.unwrap_or_default(),
            km_remaining,
        })
    }

    // --- Operaciones dentro de transacción (controladores de ciclo de vida) ---

    /// Releer el vehículo con lock de fila. El estado leído antes de la
    /// transacción nunca se usa para decidir.
    pub async fn find_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(AppError::from_sqlx)?;

        Ok(vehicle)
    }

    pub async fn set_status(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(())
    }

    /// Efectos de completar un viaje: odómetro final y vuelta a disponible.
    pub async fn apply_trip_completion(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        final_odometer: i64,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET odometer = $2, status = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(final_odometer)
        .bind(VehicleStatus::Available)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(vehicle)
    }

    /// Efectos de completar un mantenimiento: disponible y contador a 0
    /// (el intervalo de servicio se reinicia).
    pub async fn apply_maintenance_completion(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET odometer = 0, status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(VehicleStatus::Available)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(vehicle)
    }
}
