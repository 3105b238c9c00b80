use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{
    CreateDriverRequest, DriverFilters, DriverStatsResponse, UpdateDriverRequest,
};
use crate::models::driver::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;

        let driver = self
            .repository
            .create(request.name, request.id_card, request.license, request.phone)
            .await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Chofer creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Chofer no encontrado".to_string()))
    }

    pub async fn list(&self, filters: DriverFilters) -> Result<Vec<Driver>, AppError> {
        self.repository.list(&filters).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;

        let driver = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Chofer actualizado exitosamente".to_string(),
        ))
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.deactivate(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn stats(&self, id: Uuid) -> Result<DriverStatsResponse, AppError> {
        self.repository.stats(id).await
    }
}
