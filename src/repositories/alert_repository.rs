use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::alert_dto::{AlertFilters, AlertListRow, AlertStats};
use crate::utils::errors::AppError;

/// Repositorio de alertas: solo lecturas y borrado administrativo.
/// La creación y resolución de alertas pertenece al AlertEngine.
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AlertListRow>, AppError> {
        let alert = sqlx::query_as::<_, AlertListRow>(
            r#"
            SELECT
                a.*,
                CASE
                    WHEN a.category = 'maintenance_due' THEN v.plate
                    WHEN a.category = 'hours_exceeded' THEN d.name
                END AS related_label,
                (CURRENT_DATE - a.created_at::date)::int AS days_active
            FROM alerts a
            LEFT JOIN vehicles v ON a.category = 'maintenance_due' AND a.related_id = v.id
            LEFT JOIN drivers d ON a.category = 'hours_exceeded' AND a.related_id = d.id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(alert)
    }

    /// Listado ordenado por prioridad (alta primero) y fecha
    pub async fn list(&self, filters: &AlertFilters) -> Result<Vec<AlertListRow>, AppError> {
        let alerts = sqlx::query_as::<_, AlertListRow>(
            r#"
            SELECT
                a.*,
                CASE
                    WHEN a.category = 'maintenance_due' THEN v.plate
                    WHEN a.category = 'hours_exceeded' THEN d.name
                END AS related_label,
                (CURRENT_DATE - a.created_at::date)::int AS days_active
            FROM alerts a
            LEFT JOIN vehicles v ON a.category = 'maintenance_due' AND a.related_id = v.id
            LEFT JOIN drivers d ON a.category = 'hours_exceeded' AND a.related_id = d.id
            WHERE ($1::alert_status IS NULL OR a.status = $1)
              AND ($2::alert_category IS NULL OR a.category = $2)
              AND ($3::alert_priority IS NULL OR a.priority = $3)
            ORDER BY
                CASE a.priority
                    WHEN 'high' THEN 1
                    WHEN 'medium' THEN 2
                    WHEN 'low' THEN 3
                END,
                a.created_at DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.category)
        .bind(filters.priority)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(alerts)
    }

    /// Alertas activas para el dashboard (prioridad alta primero)
    pub async fn active_for_dashboard(&self, limit: i64) -> Result<Vec<AlertListRow>, AppError> {
        let alerts = sqlx::query_as::<_, AlertListRow>(
            r#"
            SELECT
                a.*,
                CASE
                    WHEN a.category = 'maintenance_due' THEN v.plate
                    WHEN a.category = 'hours_exceeded' THEN d.name
                END AS related_label,
                (CURRENT_DATE - a.created_at::date)::int AS days_active
            FROM alerts a
            LEFT JOIN vehicles v ON a.category = 'maintenance_due' AND a.related_id = v.id
            LEFT JOIN drivers d ON a.category = 'hours_exceeded' AND a.related_id = d.id
            WHERE a.status = 'active'
            ORDER BY
                CASE a.priority
                    WHEN 'high' THEN 1
                    WHEN 'medium' THEN 2
                    WHEN 'low' THEN 3
                END,
                a.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(alerts)
    }

    pub async fn stats(&self) -> Result<AlertStats, AppError> {
        let stats = sqlx::query_as::<_, AlertStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'active') AS active,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE priority = 'high') AS high_priority,
                COUNT(*) FILTER (WHERE category = 'maintenance_due') AS maintenance_alerts,
                COUNT(*) FILTER (WHERE category = 'hours_exceeded') AS hours_alerts
            FROM alerts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;

        Ok(stats)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Alerta no encontrada".to_string()));
        }

        Ok(())
    }
}
