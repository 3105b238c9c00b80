//! Services module
//!
//! Este módulo contiene la lógica de negocio transversal: el motor de
//! alertas/umbrales y el validador de transiciones de estado.

pub mod alert_engine;
pub mod transition_validator;

pub use alert_engine::*;
pub use transition_validator::*;
