//! DTOs de la API
//!
//! Requests y responses serializables por recurso.

pub mod alert_dto;
pub mod auth_dto;
pub mod common;
pub mod dashboard_dto;
pub mod driver_dto;
pub mod maintenance_dto;
pub mod route_dto;
pub mod trip_dto;
pub mod vehicle_dto;
