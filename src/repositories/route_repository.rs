use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::route_dto::UpdateRouteRequest;
use crate::models::route::Route;
use crate::utils::errors::AppError;

const FK_VIOLATION: &str = "23503";

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        origin: String,
        destination: String,
        distance_km: Decimal,
    ) -> Result<Route, AppError> {
        let id = Uuid::new_v4();

        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, name, origin, destination, distance_km, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(origin)
        .bind(destination)
        .bind(distance_km)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(route)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(route)
    }

    pub async fn list(&self) -> Result<Vec<Route>, AppError> {
        let routes = sqlx::query_as::<_, Route>("SELECT * FROM routes ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        Ok(routes)
    }

    pub async fn update(&self, id: Uuid, request: UpdateRouteRequest) -> Result<Route, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET name = $2, origin = $3, destination = $4, distance_km = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.unwrap_or(current.name))
        .bind(request.origin.unwrap_or(current.origin))
        .bind(request.destination.unwrap_or(current.destination))
        .bind(request.distance_km.unwrap_or(current.distance_km))
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(route)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(FK_VIOLATION) => {
                    AppError::Conflict(
                        "No se puede eliminar la ruta porque tiene viajes asociados".to_string(),
                    )
                }
                _ => AppError::from_sqlx(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ruta no encontrada".to_string()));
        }

        Ok(())
    }
}
