//! Motor de alertas y umbrales
//!
//! Evalúa umbrales (kilometraje restante, costo de mantenimiento) y crea o
//! resuelve alertas. Siempre se invoca dentro de la transacción del
//! controlador que disparó la mutación: el estado derivado del vehículo y
//! sus alertas nunca pueden divergir de forma observable.
//!
//! Ningún otro código escribe filas de alertas (salvo el borrado
//! administrativo del repositorio).

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::alert::{Alert, AlertCategory, AlertPriority, AlertStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::services::transition_validator::validate_transition;
use crate::utils::errors::AppError;

/// Umbrales configurados del motor. Nunca literales en la lógica.
#[derive(Debug, Clone)]
pub struct AlertThresholds {
    /// Banda de aviso: km restantes a partir de los cuales se alerta.
    pub warning_band: i64,
    /// Costo de mantenimiento a partir del cual se emite alerta informativa.
    pub high_cost_limit: Decimal,
}

impl From<&EnvironmentConfig> for AlertThresholds {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            warning_band: config.maintenance_warning_band,
            high_cost_limit: config.maintenance_high_cost_limit,
        }
    }
}

/// Resultado puro de la evaluación de kilometraje.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdDecision {
    /// Kilometraje dentro de margen, sin acción.
    None,
    /// Cerca del límite: alerta de prioridad alta.
    NearLimit,
    /// Límite excedido: alerta urgente y vehículo forzado a mantenimiento.
    Overdue,
}

/// Clasificar el kilometraje restante contra la banda de aviso.
/// Separado para poder probar la tabla de decisión sin base de datos.
pub fn classify_remaining(remaining: i64, warning_band: i64) -> ThresholdDecision {
    if remaining <= 0 {
        ThresholdDecision::Overdue
    } else if remaining <= warning_band {
        ThresholdDecision::NearLimit
    } else {
        ThresholdDecision::None
    }
}

/// Decidir si una clasificación debe persistirse como alerta nueva.
///
/// Una alerta activa para la misma relación suprime el duplicado: si otro
/// viaje cruza el umbral antes de resolver la alerta existente, no se
/// crea una segunda.
pub fn should_raise_alert(decision: ThresholdDecision, has_active_alert: bool) -> bool {
    decision != ThresholdDecision::None && !has_active_alert
}

pub struct AlertEngine {
    thresholds: AlertThresholds,
}

impl AlertEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluar el kilometraje del vehículo tras una mutación.
    ///
    /// Con el límite excedido el vehículo pasa a InMaintenance (bloquea la
    /// creación de viajes futuros) y se crea una alerta urgente; cerca del
    /// límite solo la alerta. En ambos casos una alerta activa existente
    /// para (maintenance_due, vehículo) suprime el duplicado.
    pub async fn evaluate_odometer_threshold(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vehicle: &Vehicle,
    ) -> Result<Option<Uuid>, AppError> {
        let remaining = vehicle.remaining_km();

        match classify_remaining(remaining, self.thresholds.warning_band) {
            ThresholdDecision::None => Ok(None),
            ThresholdDecision::NearLimit => {
                let has_active = self
                    .has_active_alert(tx, AlertCategory::MaintenanceDue, vehicle.id)
                    .await?;
                if !should_raise_alert(ThresholdDecision::NearLimit, has_active) {
                    return Ok(None);
                }
                let message = format!(
                    "Vehículo {} cerca del límite de servicio: quedan {} km de {}",
                    vehicle.plate, remaining, vehicle.service_limit
                );
                let id = self
                    .insert_alert(
                        tx,
                        AlertCategory::MaintenanceDue,
                        vehicle.id,
                        &message,
                        AlertPriority::High,
                    )
                    .await?;
                Ok(Some(id))
            }
            ThresholdDecision::Overdue => {
                // Bloquear el vehículo antes de alertar: un viaje nuevo ya
                // no debe poder crearse sobre él.
                sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
                    .bind(vehicle.id)
                    .bind(VehicleStatus::InMaintenance)
                    .execute(&mut **tx)
                    .await
                    .map_err(AppError::from_sqlx)?;

                let has_active = self
                    .has_active_alert(tx, AlertCategory::MaintenanceDue, vehicle.id)
                    .await?;
                if !should_raise_alert(ThresholdDecision::Overdue, has_active) {
                    return Ok(None);
                }
                let message = format!(
                    "URGENTE: vehículo {} excedió su límite de servicio ({} km sobre {}). Mantenimiento forzado.",
                    vehicle.plate, vehicle.odometer, vehicle.service_limit
                );
                let id = self
                    .insert_alert(
                        tx,
                        AlertCategory::MaintenanceDue,
                        vehicle.id,
                        &message,
                        AlertPriority::High,
                    )
                    .await?;
                Ok(Some(id))
            }
        }
    }

    /// Alerta informativa de costo elevado al programar un mantenimiento.
    /// No es un fallo de precondición: el mantenimiento se programa igual.
    pub async fn raise_high_cost_alert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vehicle: &Vehicle,
        maintenance_id: Uuid,
        cost: Decimal,
    ) -> Result<Option<Uuid>, AppError> {
        if cost <= self.thresholds.high_cost_limit {
            return Ok(None);
        }

        let message = format!(
            "Mantenimiento {} del vehículo {} excede el límite de costo: {} > {}",
            maintenance_id, vehicle.plate, cost, self.thresholds.high_cost_limit
        );
        let id = self
            .insert_alert(
                tx,
                AlertCategory::MaintenanceDue,
                vehicle.id,
                &message,
                AlertPriority::High,
            )
            .await?;
        Ok(Some(id))
    }

    /// Resolver todas las alertas activas de (categoría, relación).
    /// Idempotente: cero filas afectadas no es un error.
    pub async fn resolve_for_relation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: AlertCategory,
        related_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE alerts
            SET status = $3
            WHERE category = $1 AND related_id = $2 AND status = $4
            "#,
        )
        .bind(category)
        .bind(related_id)
        .bind(AlertStatus::Resolved)
        .bind(AlertStatus::Active)
        .execute(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(result.rows_affected())
    }

    /// Crear una alerta manual (endpoint administrativo).
    pub async fn create_manual(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: AlertCategory,
        related_id: Uuid,
        message: &str,
        priority: AlertPriority,
    ) -> Result<Uuid, AppError> {
        self.insert_alert(tx, category, related_id, message, priority).await
    }

    /// Resolver una alerta concreta validando su transición de estado.
    pub async fn resolve_one(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        alert_id: Uuid,
    ) -> Result<(), AppError> {
        let alert = sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = $1 FOR UPDATE")
            .bind(alert_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?
            .ok_or_else(|| AppError::NotFound("Alerta no encontrada".to_string()))?;

        let new_status = validate_transition(alert.status, AlertStatus::Resolved)?;

        sqlx::query("UPDATE alerts SET status = $2 WHERE id = $1")
            .bind(alert_id)
            .bind(new_status)
            .execute(&mut **tx)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(())
    }

    async fn has_active_alert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: AlertCategory,
        related_id: Uuid,
    ) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM alerts WHERE category = $1 AND related_id = $2 AND status = $3)",
        )
        .bind(category)
        .bind(related_id)
        .bind(AlertStatus::Active)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(row.0)
    }

    async fn insert_alert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: AlertCategory,
        related_id: Uuid,
        message: &str,
        priority: AlertPriority,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO alerts (id, category, related_id, message, priority, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(category)
        .bind(related_id)
        .bind(message)
        .bind(priority)
        .bind(AlertStatus::Active)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_within_margin() {
        assert_eq!(classify_remaining(4000, 500), ThresholdDecision::None);
        assert_eq!(classify_remaining(501, 500), ThresholdDecision::None);
    }

    #[test]
    fn test_classify_near_limit_band_is_inclusive() {
        assert_eq!(classify_remaining(500, 500), ThresholdDecision::NearLimit);
        assert_eq!(classify_remaining(400, 500), ThresholdDecision::NearLimit);
        assert_eq!(classify_remaining(1, 500), ThresholdDecision::NearLimit);
    }

    #[test]
    fn test_classify_overdue_at_zero_and_below() {
        assert_eq!(classify_remaining(0, 500), ThresholdDecision::Overdue);
        assert_eq!(classify_remaining(-250, 500), ThresholdDecision::Overdue);
    }

    #[test]
    fn test_near_limit_at_9600_of_10000() {
        // service_limit=10000, odometer=9600 -> quedan 400, alerta near-limit
        assert_eq!(classify_remaining(10000 - 9600, 500), ThresholdDecision::NearLimit);
    }

    #[test]
    fn test_active_alert_suppresses_duplicate() {
        // Un segundo viaje completado con la alerta aún sin resolver no
        // debe crear otra para la misma relación.
        assert!(!should_raise_alert(ThresholdDecision::NearLimit, true));
        assert!(!should_raise_alert(ThresholdDecision::Overdue, true));
    }

    #[test]
    fn test_raise_alert_without_active_duplicate() {
        assert!(should_raise_alert(ThresholdDecision::NearLimit, false));
        assert!(should_raise_alert(ThresholdDecision::Overdue, false));
    }

    #[test]
    fn test_within_margin_never_raises() {
        assert!(!should_raise_alert(ThresholdDecision::None, false));
        assert!(!should_raise_alert(ThresholdDecision::None, true));
    }
}
