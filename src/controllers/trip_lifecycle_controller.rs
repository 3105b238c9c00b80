//! Controlador del ciclo de vida de viajes
//!
//! Máquina de estados: programmed --(start)--> in_progress --(complete)-->
//! completed; programmed|in_progress --(cancel)--> cancelled.
//!
//! Cada operación es una transacción: relee las filas implicadas con lock,
//! valida la transición contra el estado registrado y aplica todos los
//! efectos juntos. Un fallo en cualquier paso (incluida la evaluación de
//! umbrales) revierte la operación completa; un viaje nunca queda
//! completado sin sus efectos derivados.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{
    CancelTripRequest, CompleteTripRequest, CreateTripRequest, StartTripRequest,
    TripCompletedResponse, TripCreatedResponse,
};
use crate::models::driver::DriverStatus;
use crate::models::trip::TripStatus;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::alert_engine::{AlertEngine, AlertThresholds};
use crate::services::transition_validator::validate_transition;
use crate::utils::errors::AppError;

/// Horas trabajadas (fraccionales) entre inicio y fin de un viaje.
/// El fin debe ser posterior al inicio.
pub fn compute_hours_worked(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<f64, AppError> {
    if end_time <= start_time {
        return Err(AppError::InvalidData(
            "La hora de fin debe ser posterior a la hora de inicio".to_string(),
        ));
    }

    let seconds = (end_time - start_time).num_seconds();
    Ok(seconds as f64 / 3600.0)
}

/// El odómetro reportado al completar un viaje nunca retrocede respecto
/// del valor actual del vehículo. Igual es válido (viaje de prueba).
pub fn validate_odometer_progression(current: i64, reported: i64) -> Result<(), AppError> {
    if reported < current {
        return Err(AppError::InvalidData(format!(
            "El odómetro final ({}) no puede ser menor que el actual ({})",
            reported, current
        )));
    }
    Ok(())
}

pub struct TripLifecycleController {
    pool: PgPool,
    alert_engine: AlertEngine,
}

impl TripLifecycleController {
    pub fn new(pool: PgPool, thresholds: AlertThresholds) -> Self {
        Self {
            pool,
            alert_engine: AlertEngine::new(thresholds),
        }
    }

    /// Crear un viaje en estado programado y ocupar el vehículo.
    /// Precondiciones: vehículo disponible, chofer activo.
    pub async fn create(
        &self,
        request: CreateTripRequest,
    ) -> Result<ApiResponse<TripCreatedResponse>, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let vehicle = VehicleRepository::find_for_update(&mut tx, request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.status != VehicleStatus::Available {
            return Err(AppError::PreconditionFailed(format!(
                "El vehículo {} no está disponible (estado actual: {})",
                vehicle.plate,
                vehicle.status.as_str()
            )));
        }

        let driver = DriverRepository::find_for_update(&mut tx, request.driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Chofer no encontrado".to_string()))?;

        if driver.status != DriverStatus::Active {
            return Err(AppError::PreconditionFailed(format!(
                "El chofer {} no está activo (estado actual: {})",
                driver.name,
                driver.status.as_str()
            )));
        }

        let route_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM routes WHERE id = $1)")
                .bind(request.route_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::from_sqlx)?;

        if !route_exists.0 {
            return Err(AppError::NotFound("Ruta no encontrada".to_string()));
        }

        let trip = TripRepository::insert(
            &mut tx,
            request.vehicle_id,
            request.driver_id,
            request.route_id,
            request.date,
            request.cargo,
        )
        .await?;

        VehicleRepository::set_status(&mut tx, vehicle.id, VehicleStatus::InUse).await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        log::info!("Viaje {} creado (vehículo {})", trip.id, vehicle.plate);

        Ok(ApiResponse::success_with_message(
            TripCreatedResponse {
                id: trip.id,
                status: trip.status,
            },
            "Viaje creado correctamente".to_string(),
        ))
    }

    /// Iniciar un viaje programado.
    pub async fn start(
        &self,
        trip_id: Uuid,
        request: StartTripRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let trip = TripRepository::find_for_update(&mut tx, trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        validate_transition(trip.status, TripStatus::InProgress)?;

        TripRepository::mark_started(&mut tx, trip_id, request.start_time).await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "id": trip_id }),
            "Viaje iniciado".to_string(),
        ))
    }

    /// Completar un viaje en curso con todos sus efectos derivados:
    /// odómetro y disponibilidad del vehículo, horas del chofer,
    /// evaluación de umbrales de mantenimiento. Todo o nada.
    ///
    /// Dos completados concurrentes sobre el mismo viaje: el lock de fila
    /// serializa, el perdedor relee un estado terminal y recibe
    /// InvalidTransition sin duplicar efectos.
    pub async fn complete(
        &self,
        trip_id: Uuid,
        request: CompleteTripRequest,
    ) -> Result<ApiResponse<TripCompletedResponse>, AppError> {
        request.validate()?;

        let hours_worked = compute_hours_worked(request.start_time, request.end_time)?;

        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let trip = TripRepository::find_for_update(&mut tx, trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        validate_transition(trip.status, TripStatus::Completed)?;

        let vehicle = VehicleRepository::find_for_update(&mut tx, trip.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        validate_odometer_progression(vehicle.odometer, request.final_odometer)?;

        TripRepository::mark_completed(
            &mut tx,
            trip_id,
            request.start_time,
            request.end_time,
            request.fuel_used,
            request.final_odometer,
            request.notes,
        )
        .await?;

        let updated_vehicle =
            VehicleRepository::apply_trip_completion(&mut tx, vehicle.id, request.final_odometer)
                .await?;

        DriverRepository::add_hours(&mut tx, trip.driver_id, hours_worked).await?;

        // Misma transacción: el estado derivado del vehículo y sus alertas
        // no pueden divergir de forma observable.
        self.alert_engine
            .evaluate_odometer_threshold(&mut tx, &updated_vehicle)
            .await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        log::info!(
            "Viaje {} completado: {:.2} horas, odómetro {}",
            trip_id,
            hours_worked,
            request.final_odometer
        );

        Ok(ApiResponse::success_with_message(
            TripCompletedResponse {
                id: trip_id,
                status: TripStatus::Completed,
                hours_worked,
                final_odometer: request.final_odometer,
            },
            "Viaje completado correctamente".to_string(),
        ))
    }

    /// Cancelar un viaje no terminal y liberar el vehículo.
    /// Sin cambios de odómetro ni de horas.
    pub async fn cancel(
        &self,
        trip_id: Uuid,
        request: CancelTripRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let trip = TripRepository::find_for_update(&mut tx, trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        validate_transition(trip.status, TripStatus::Cancelled)?;

        TripRepository::mark_cancelled(&mut tx, trip_id, request.notes).await?;
        VehicleRepository::set_status(&mut tx, trip.vehicle_id, VehicleStatus::Available).await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "id": trip_id }),
            "Viaje cancelado".to_string(),
        ))
    }

    // --- Lecturas (sin efectos de ciclo de vida) ---

    pub async fn get_by_id(&self, trip_id: Uuid) -> Result<crate::models::trip::Trip, AppError> {
        TripRepository::new(self.pool.clone())
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))
    }

    pub async fn list(
        &self,
        filters: crate::dto::trip_dto::TripFilters,
    ) -> Result<Vec<crate::models::trip::TripListRow>, AppError> {
        TripRepository::new(self.pool.clone()).list(&filters).await
    }

    pub async fn delete(&self, trip_id: Uuid) -> Result<(), AppError> {
        TripRepository::new(self.pool.clone()).delete(trip_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hours_worked_fractional() {
        let start = Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 14, 17, 30, 0).unwrap();

        let hours = compute_hours_worked(start, end).unwrap();
        assert!((hours - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_hours_worked_rejects_end_before_start() {
        let start = Utc.with_ymd_and_hms(2025, 3, 14, 17, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap();

        assert!(matches!(
            compute_hours_worked(start, end),
            Err(AppError::InvalidData(_))
        ));
    }

    #[test]
    fn test_hours_worked_rejects_equal_times() {
        let t = Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap();
        assert!(matches!(
            compute_hours_worked(t, t),
            Err(AppError::InvalidData(_))
        ));
    }

    #[test]
    fn test_odometer_rejects_decrease() {
        assert!(matches!(
            validate_odometer_progression(42000, 41999),
            Err(AppError::InvalidData(_))
        ));
    }

    #[test]
    fn test_odometer_accepts_equal_and_increase() {
        assert!(validate_odometer_progression(42000, 42000).is_ok());
        assert!(validate_odometer_progression(42000, 42350).is_ok());
    }
}
