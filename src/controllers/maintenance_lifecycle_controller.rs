//! Controlador del ciclo de vida de mantenimientos
//!
//! Máquina de estados: scheduled --(complete)--> completed. No hay
//! cancelación. Completar un mantenimiento devuelve el vehículo a
//! disponible, reinicia su contador de kilometraje y resuelve las alertas
//! de mantenimiento activas del vehículo, todo en una transacción.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{
    CompleteMaintenanceRequest, MaintenanceScheduledResponse, ScheduleMaintenanceRequest,
    UpdateMaintenanceRequest,
};
use crate::models::alert::AlertCategory;
use crate::models::maintenance::MaintenanceStatus;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::alert_engine::{AlertEngine, AlertThresholds};
use crate::services::transition_validator::validate_transition;
use crate::utils::errors::AppError;

pub struct MaintenanceLifecycleController {
    pool: PgPool,
    alert_engine: AlertEngine,
}

impl MaintenanceLifecycleController {
    pub fn new(pool: PgPool, thresholds: AlertThresholds) -> Self {
        Self {
            pool,
            alert_engine: AlertEngine::new(thresholds),
        }
    }

    /// Programar un mantenimiento y poner el vehículo en mantenimiento.
    /// Un costo por encima del límite configurado emite una alerta
    /// informativa; nunca es un fallo de precondición.
    pub async fn schedule(
        &self,
        request: ScheduleMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceScheduledResponse>, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let vehicle = VehicleRepository::find_for_update(&mut tx, request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let maintenance = MaintenanceRepository::insert(
            &mut tx,
            request.vehicle_id,
            request.date,
            request.kind,
            request.description,
            request.cost,
        )
        .await?;

        VehicleRepository::set_status(&mut tx, vehicle.id, VehicleStatus::InMaintenance).await?;

        let high_cost_alert = self
            .alert_engine
            .raise_high_cost_alert(&mut tx, &vehicle, maintenance.id, maintenance.cost)
            .await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        log::info!(
            "Mantenimiento {} programado para vehículo {}",
            maintenance.id,
            vehicle.plate
        );

        Ok(ApiResponse::success_with_message(
            MaintenanceScheduledResponse {
                id: maintenance.id,
                status: maintenance.status,
                high_cost_alert,
            },
            "Mantenimiento registrado exitosamente".to_string(),
        ))
    }

    /// Completar un mantenimiento programado. Actualización del registro,
    /// vuelta del vehículo a disponible con odómetro en 0 y resolución de
    /// alertas comprometen juntas o ninguna.
    pub async fn complete(
        &self,
        maintenance_id: Uuid,
        request: CompleteMaintenanceRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let maintenance = MaintenanceRepository::find_for_update(&mut tx, maintenance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;

        validate_transition(maintenance.status, MaintenanceStatus::Completed)?;

        MaintenanceRepository::mark_completed(
            &mut tx,
            maintenance_id,
            request.cost,
            request.description,
        )
        .await?;

        // El intervalo de servicio se reinicia: disponible y odómetro a 0
        VehicleRepository::apply_maintenance_completion(&mut tx, maintenance.vehicle_id).await?;

        let resolved = self
            .alert_engine
            .resolve_for_relation(&mut tx, AlertCategory::MaintenanceDue, maintenance.vehicle_id)
            .await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        log::info!(
            "Mantenimiento {} completado ({} alertas resueltas)",
            maintenance_id,
            resolved
        );

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "id": maintenance_id, "resolved_alerts": resolved }),
            "Mantenimiento completado exitosamente. El vehículo está disponible y el contador de kilometraje se ha reiniciado.".to_string(),
        ))
    }

    // --- Lecturas (sin efectos de ciclo de vida) ---

    pub async fn get_by_id(
        &self,
        maintenance_id: Uuid,
    ) -> Result<crate::models::maintenance::Maintenance, AppError> {
        MaintenanceRepository::new(self.pool.clone())
            .find_by_id(maintenance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))
    }

    pub async fn list(
        &self,
        filters: crate::dto::maintenance_dto::MaintenanceFilters,
    ) -> Result<Vec<crate::models::maintenance::Maintenance>, AppError> {
        MaintenanceRepository::new(self.pool.clone()).list(&filters).await
    }

    pub async fn history_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<crate::models::maintenance::Maintenance>, AppError> {
        MaintenanceRepository::new(self.pool.clone())
            .history_for_vehicle(vehicle_id)
            .await
    }

    pub async fn stats(&self) -> Result<crate::dto::maintenance_dto::MaintenanceStats, AppError> {
        MaintenanceRepository::new(self.pool.clone()).stats().await
    }

    pub async fn update(
        &self,
        maintenance_id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<crate::models::maintenance::Maintenance, AppError> {
        request.validate()?;

        MaintenanceRepository::new(self.pool.clone())
            .update(
                maintenance_id,
                request.date,
                request.kind,
                request.description,
                request.cost,
            )
            .await
    }

    pub async fn delete(&self, maintenance_id: Uuid) -> Result<(), AppError> {
        MaintenanceRepository::new(self.pool.clone())
            .delete(maintenance_id)
            .await
    }
}
