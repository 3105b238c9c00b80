use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::route_dto::{CreateRouteRequest, UpdateRouteRequest};
use crate::models::route::Route;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;

pub struct RouteController {
    repository: RouteRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateRouteRequest) -> Result<ApiResponse<Route>, AppError> {
        request.validate()?;

        let route = self
            .repository
            .create(
                request.name,
                request.origin,
                request.destination,
                request.distance_km,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            route,
            "Ruta creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Route, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Route>, AppError> {
        self.repository.list().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRouteRequest,
    ) -> Result<ApiResponse<Route>, AppError> {
        request.validate()?;

        let route = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            route,
            "Ruta actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
