//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración,
//! incluidos los umbrales del motor de alertas (nunca literales en la lógica).

use std::env;

use rust_decimal::Decimal;

/// Banda de aviso por defecto (km restantes para alertar)
const DEFAULT_WARNING_BAND: i64 = 500;
/// Límite de costo de mantenimiento por defecto
const DEFAULT_HIGH_COST_LIMIT: &str = "5000";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    /// Km restantes a partir de los cuales se alerta mantenimiento próximo
    pub maintenance_warning_band: i64,
    /// Costo a partir del cual un mantenimiento genera alerta informativa
    pub maintenance_high_cost_limit: Decimal,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "28800".to_string())
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            maintenance_warning_band: env::var("MAINTENANCE_WARNING_BAND")
                .unwrap_or_else(|_| DEFAULT_WARNING_BAND.to_string())
                .parse()
                .expect("MAINTENANCE_WARNING_BAND must be a valid number"),
            maintenance_high_cost_limit: env::var("MAINTENANCE_HIGH_COST_LIMIT")
                .unwrap_or_else(|_| DEFAULT_HIGH_COST_LIMIT.to_string())
                .parse()
                .expect("MAINTENANCE_HIGH_COST_LIMIT must be a valid decimal"),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
