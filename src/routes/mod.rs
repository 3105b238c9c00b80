pub mod alert_routes;
pub mod auth_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod maintenance_routes;
pub mod route_routes;
pub mod trip_routes;
pub mod vehicle_routes;
