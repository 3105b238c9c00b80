//! Modelo de Route
//!
//! Rutas predefinidas de la flota (origen, destino, distancia).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: Decimal,
    pub created_at: DateTime<Utc>,
}
