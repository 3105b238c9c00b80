//! Validador de transiciones de estado
//!
//! Única fuente de verdad de las transiciones legales por entidad. Los
//! controladores nunca repiten comprobaciones de legalidad inline: leen el
//! estado actual dentro de su transacción y lo pasan por aquí.

use std::fmt::Debug;

use crate::models::alert::AlertStatus;
use crate::models::maintenance::MaintenanceStatus;
use crate::models::trip::TripStatus;
use crate::models::vehicle::VehicleStatus;
use crate::utils::errors::AppError;

/// Máquina de estados de una entidad: lista de adyacencia por estado.
/// Un estado terminal tiene lista vacía.
pub trait StateMachine: Copy + Eq + Debug + 'static {
    /// Nombre de la entidad para mensajes de error.
    const ENTITY: &'static str;

    /// Estados alcanzables desde `self` en una transición.
    fn transitions(self) -> &'static [Self];

    /// Etiqueta legible del estado.
    fn label(self) -> &'static str;

    fn is_terminal(self) -> bool {
        self.transitions().is_empty()
    }

    fn can_transition_to(self, target: Self) -> bool {
        self.transitions().contains(&target)
    }
}

/// Validar una transición solicitada contra el estado registrado.
/// Devuelve el nuevo estado o InvalidTransition (incluye carreras perdidas:
/// el estado releído dentro de la transacción ya no permite la transición).
pub fn validate_transition<S: StateMachine>(current: S, target: S) -> Result<S, AppError> {
    if current.can_transition_to(target) {
        Ok(target)
    } else {
        Err(AppError::InvalidTransition(format!(
            "{} no puede pasar de '{}' a '{}'",
            S::ENTITY,
            current.label(),
            target.label()
        )))
    }
}

impl StateMachine for TripStatus {
    const ENTITY: &'static str = "Viaje";

    fn transitions(self) -> &'static [Self] {
        match self {
            TripStatus::Programmed => &[TripStatus::InProgress, TripStatus::Cancelled],
            TripStatus::InProgress => &[TripStatus::Completed, TripStatus::Cancelled],
            TripStatus::Completed => &[],
            TripStatus::Cancelled => &[],
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl StateMachine for MaintenanceStatus {
    const ENTITY: &'static str = "Mantenimiento";

    fn transitions(self) -> &'static [Self] {
        match self {
            MaintenanceStatus::Scheduled => &[MaintenanceStatus::Completed],
            MaintenanceStatus::Completed => &[],
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl StateMachine for VehicleStatus {
    const ENTITY: &'static str = "Vehículo";

    // El vehículo no tiene estado terminal: rota entre disponibilidad,
    // uso y mantenimiento según lo que lo ocupe.
    fn transitions(self) -> &'static [Self] {
        match self {
            VehicleStatus::Available => &[VehicleStatus::InUse, VehicleStatus::InMaintenance],
            VehicleStatus::InUse => &[VehicleStatus::Available, VehicleStatus::InMaintenance],
            VehicleStatus::InMaintenance => &[VehicleStatus::Available],
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl StateMachine for AlertStatus {
    const ENTITY: &'static str = "Alerta";

    fn transitions(self) -> &'static [Self] {
        match self {
            AlertStatus::Active => &[AlertStatus::Resolved],
            AlertStatus::Resolved => &[],
        }
    }

    fn label(self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Resolved => "resolved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_legal_transitions() {
        assert!(validate_transition(TripStatus::Programmed, TripStatus::InProgress).is_ok());
        assert!(validate_transition(TripStatus::Programmed, TripStatus::Cancelled).is_ok());
        assert!(validate_transition(TripStatus::InProgress, TripStatus::Completed).is_ok());
        assert!(validate_transition(TripStatus::InProgress, TripStatus::Cancelled).is_ok());
    }

    #[test]
    fn test_trip_terminal_states_reject_everything() {
        for terminal in [TripStatus::Completed, TripStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for target in [
                TripStatus::Programmed,
                TripStatus::InProgress,
                TripStatus::Completed,
                TripStatus::Cancelled,
            ] {
                assert!(matches!(
                    validate_transition(terminal, target),
                    Err(AppError::InvalidTransition(_))
                ));
            }
        }
    }

    #[test]
    fn test_trip_cannot_skip_to_completed() {
        // Programado no puede completarse sin pasar por en curso
        assert!(matches!(
            validate_transition(TripStatus::Programmed, TripStatus::Completed),
            Err(AppError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_maintenance_single_edge() {
        assert!(validate_transition(MaintenanceStatus::Scheduled, MaintenanceStatus::Completed)
            .is_ok());
        assert!(MaintenanceStatus::Completed.is_terminal());
        assert!(matches!(
            validate_transition(MaintenanceStatus::Completed, MaintenanceStatus::Scheduled),
            Err(AppError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_vehicle_in_maintenance_only_returns_available() {
        assert!(validate_transition(VehicleStatus::InMaintenance, VehicleStatus::Available).is_ok());
        assert!(matches!(
            validate_transition(VehicleStatus::InMaintenance, VehicleStatus::InUse),
            Err(AppError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_alert_resolution_is_terminal() {
        assert!(validate_transition(AlertStatus::Active, AlertStatus::Resolved).is_ok());
        assert!(AlertStatus::Resolved.is_terminal());
    }

    #[test]
    fn test_error_message_names_entity_and_states() {
        let err = validate_transition(TripStatus::Completed, TripStatus::Cancelled).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Viaje"));
        assert!(msg.contains("completed"));
        assert!(msg.contains("cancelled"));
    }
}
