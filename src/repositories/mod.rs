//! Repositorios
//!
//! SQL parametrizado por entidad. Las funciones asociadas que reciben una
//! transacción son las únicas vías de escritura de estado de ciclo de vida.

pub mod alert_repository;
pub mod driver_repository;
pub mod maintenance_repository;
pub mod route_repository;
pub mod trip_repository;
pub mod user_repository;
pub mod vehicle_repository;
