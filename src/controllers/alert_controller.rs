//! Controlador de alertas
//!
//! Las lecturas y el borrado administrativo van al repositorio; toda
//! creación o resolución pasa por el AlertEngine dentro de una transacción.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::alert_dto::{
    AlertFilters, AlertListRow, AlertStats, CreateAlertRequest, ResolvedByRelationResponse,
};
use crate::dto::common::ApiResponse;
use crate::models::alert::{AlertCategory, AlertPriority};
use crate::repositories::alert_repository::AlertRepository;
use crate::services::alert_engine::{AlertEngine, AlertThresholds};
use crate::utils::errors::AppError;

pub struct AlertController {
    pool: PgPool,
    repository: AlertRepository,
    alert_engine: AlertEngine,
}

impl AlertController {
    pub fn new(pool: PgPool, thresholds: AlertThresholds) -> Self {
        Self {
            repository: AlertRepository::new(pool.clone()),
            alert_engine: AlertEngine::new(thresholds),
            pool,
        }
    }

    pub async fn list(&self, filters: AlertFilters) -> Result<Vec<AlertListRow>, AppError> {
        self.repository.list(&filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AlertListRow, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alerta no encontrada".to_string()))
    }

    pub async fn active_for_dashboard(&self, limit: i64) -> Result<Vec<AlertListRow>, AppError> {
        self.repository.active_for_dashboard(limit).await
    }

    pub async fn stats(&self) -> Result<AlertStats, AppError> {
        self.repository.stats().await
    }

    pub async fn create_manual(
        &self,
        request: CreateAlertRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let id = self
            .alert_engine
            .create_manual(
                &mut tx,
                request.category,
                request.related_id,
                &request.message,
                request.priority.unwrap_or(AlertPriority::Medium),
            )
            .await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "id": id }),
            "Alerta creada exitosamente".to_string(),
        ))
    }

    pub async fn resolve(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        self.alert_engine.resolve_one(&mut tx, id).await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        Ok(())
    }

    /// Resolver todas las alertas activas de (categoría, relación).
    /// Idempotente: cero resueltas es un resultado válido, no un error.
    pub async fn resolve_by_relation(
        &self,
        category: AlertCategory,
        related_id: Uuid,
    ) -> Result<ResolvedByRelationResponse, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from_sqlx)?;

        let resolved = self
            .alert_engine
            .resolve_for_relation(&mut tx, category, related_id)
            .await?;

        tx.commit().await.map_err(AppError::from_sqlx)?;

        Ok(ResolvedByRelationResponse { resolved })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
