//! Controlador del dashboard
//!
//! Agregados de solo lectura para el panel. Ninguna consulta de este
//! módulo muta estado; el ciclo de vida vive en los controladores
//! de viajes y mantenimientos.

use sqlx::PgPool;

use crate::dto::dashboard_dto::{FleetKpis, VehicleNearMaintenance};
use crate::models::trip::TripListRow;
use crate::utils::errors::AppError;

pub struct DashboardController {
    pool: PgPool,
    warning_band: i64,
}

impl DashboardController {
    pub fn new(pool: PgPool, warning_band: i64) -> Self {
        Self { pool, warning_band }
    }

    /// KPIs agregados de la flota en una sola consulta
    pub async fn fleet_kpis(&self) -> Result<FleetKpis, AppError> {
        let kpis = sqlx::query_as::<_, FleetKpis>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles) AS total_vehicles,
                (SELECT COUNT(*) FROM vehicles WHERE status = 'available') AS vehicles_available,
                (SELECT COUNT(*) FROM vehicles WHERE status = 'in_use') AS vehicles_in_use,
                (SELECT COUNT(*) FROM vehicles WHERE status = 'in_maintenance') AS vehicles_in_maintenance,
                (SELECT COUNT(*) FROM drivers WHERE status = 'active') AS active_drivers,
                (SELECT COUNT(*) FROM trips WHERE status = 'in_progress') AS trips_in_progress,
                (SELECT COUNT(*) FROM trips
                    WHERE status = 'completed' AND date = CURRENT_DATE) AS trips_completed_today,
                (SELECT COUNT(*) FROM alerts WHERE status = 'active') AS active_alerts,
                (SELECT COALESCE(SUM(cost), 0) FROM maintenance_records
                    WHERE status = 'completed'
                    AND date_trunc('month', completed_at) = date_trunc('month', NOW())) AS maintenance_cost_month
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(kpis)
    }

    /// Vehículos dentro de la banda de aviso de mantenimiento,
    /// los más urgentes primero (incluye los ya excedidos).
    pub async fn vehicles_near_maintenance(
        &self,
    ) -> Result<Vec<VehicleNearMaintenance>, AppError> {
        let vehicles = sqlx::query_as::<_, VehicleNearMaintenance>(
            r#"
            SELECT
                id,
                plate,
                model,
                odometer,
                service_limit,
                service_limit - odometer AS km_remaining
            FROM vehicles
            WHERE service_limit - odometer <= $1
            ORDER BY service_limit - odometer ASC
            "#,
        )
        .bind(self.warning_band)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(vehicles)
    }

    /// Últimos viajes registrados para el panel
    pub async fn recent_trips(&self, limit: i64) -> Result<Vec<TripListRow>, AppError> {
        let trips = sqlx::query_as::<_, TripListRow>(
            r#"
            SELECT
                t.id, t.date, t.start_time, t.end_time, t.status,
                d.name AS driver_name,
                v.plate AS vehicle_plate,
                r.name AS route_name
            FROM trips t
            JOIN drivers d ON d.id = t.driver_id
            JOIN vehicles v ON v.id = t.vehicle_id
            JOIN routes r ON r.id = t.route_id
            ORDER BY t.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(trips)
    }
}
