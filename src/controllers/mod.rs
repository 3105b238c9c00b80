pub mod alert_controller;
pub mod auth_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod maintenance_lifecycle_controller;
pub mod route_controller;
pub mod trip_lifecycle_controller;
pub mod vehicle_controller;
