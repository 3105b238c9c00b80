//! DTOs de rutas

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

/// Request para crear una nueva ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub origin: String,

    #[validate(length(min = 2, max = 100))]
    pub destination: String,

    pub distance_km: Decimal,
}

/// Request para actualizar una ruta existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub origin: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub destination: Option<String>,

    pub distance_km: Option<Decimal>,
}
