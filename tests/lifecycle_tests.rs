//! Tests de la lógica pura del ciclo de vida: tablas de transición,
//! clasificación de umbrales, cómputo de horas y mapeo de errores HTTP.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{TimeZone, Utc};

use fleet_logistics::controllers::trip_lifecycle_controller::compute_hours_worked;
use fleet_logistics::models::alert::{AlertCategory, AlertStatus};
use fleet_logistics::models::maintenance::MaintenanceStatus;
use fleet_logistics::models::trip::TripStatus;
use fleet_logistics::models::vehicle::VehicleStatus;
use fleet_logistics::services::alert_engine::{classify_remaining, ThresholdDecision};
use fleet_logistics::services::transition_validator::{validate_transition, StateMachine};
use fleet_logistics::utils::errors::AppError;

#[test]
fn trip_happy_path_transitions() {
    assert!(validate_transition(TripStatus::Programmed, TripStatus::InProgress).is_ok());
    assert!(validate_transition(TripStatus::InProgress, TripStatus::Completed).is_ok());
}

#[test]
fn trip_cancellation_allowed_before_completion() {
    assert!(validate_transition(TripStatus::Programmed, TripStatus::Cancelled).is_ok());
    assert!(validate_transition(TripStatus::InProgress, TripStatus::Cancelled).is_ok());
}

#[test]
fn trip_cannot_skip_start() {
    let err = validate_transition(TripStatus::Programmed, TripStatus::Completed).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[test]
fn completed_trip_is_terminal() {
    assert!(TripStatus::Completed.is_terminal());
    assert!(validate_transition(TripStatus::Completed, TripStatus::InProgress).is_err());
    assert!(validate_transition(TripStatus::Cancelled, TripStatus::Programmed).is_err());
}

#[test]
fn maintenance_single_transition() {
    assert!(
        validate_transition(MaintenanceStatus::Scheduled, MaintenanceStatus::Completed).is_ok()
    );
    assert!(MaintenanceStatus::Completed.is_terminal());
}

#[test]
fn vehicle_status_cycle() {
    assert!(VehicleStatus::Available.can_transition_to(VehicleStatus::InUse));
    assert!(VehicleStatus::InUse.can_transition_to(VehicleStatus::Available));
    assert!(VehicleStatus::InUse.can_transition_to(VehicleStatus::InMaintenance));
    assert!(VehicleStatus::InMaintenance.can_transition_to(VehicleStatus::Available));
}

#[test]
fn alert_resolution_is_terminal() {
    assert!(validate_transition(AlertStatus::Active, AlertStatus::Resolved).is_ok());
    assert!(validate_transition(AlertStatus::Resolved, AlertStatus::Active).is_err());
}

#[test]
fn threshold_classification_bands() {
    assert_eq!(classify_remaining(2000, 500), ThresholdDecision::None);
    assert_eq!(classify_remaining(500, 500), ThresholdDecision::NearLimit);
    assert_eq!(classify_remaining(1, 500), ThresholdDecision::NearLimit);
    assert_eq!(classify_remaining(0, 500), ThresholdDecision::Overdue);
    assert_eq!(classify_remaining(-300, 500), ThresholdDecision::Overdue);
}

#[test]
fn hours_worked_computation() {
    let start = Utc.with_ymd_and_hms(2026, 8, 30, 8, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 8, 30, 16, 30, 0).unwrap();

    let hours = compute_hours_worked(start, end).unwrap();
    assert!((hours - 8.5).abs() < 1e-9);
}

#[test]
fn hours_worked_rejects_inverted_interval() {
    let start = Utc.with_ymd_and_hms(2026, 8, 30, 16, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 8, 30, 8, 0, 0).unwrap();

    let err = compute_hours_worked(start, end).unwrap_err();
    assert!(matches!(err, AppError::InvalidData(_)));

    // Intervalo vacío tampoco es válido
    assert!(compute_hours_worked(start, start).is_err());
}

#[test]
fn alert_category_parsing() {
    assert_eq!(
        AlertCategory::parse("maintenance_due"),
        Some(AlertCategory::MaintenanceDue)
    );
    assert_eq!(
        AlertCategory::parse("hours_exceeded"),
        Some(AlertCategory::HoursExceeded)
    );
    assert_eq!(AlertCategory::parse("other"), None);
}

#[test]
fn error_status_mapping() {
    let cases = vec![
        (
            AppError::NotFound("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND,
        ),
        (
            AppError::PreconditionFailed("x".to_string())
                .into_response()
                .status(),
            StatusCode::CONFLICT,
        ),
        (
            AppError::InvalidTransition("x".to_string())
                .into_response()
                .status(),
            StatusCode::CONFLICT,
        ),
        (
            AppError::InvalidData("x".to_string()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            AppError::Unavailable("x".to_string()).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
    ];

    for (got, expected) in cases {
        assert_eq!(got, expected);
    }
}
