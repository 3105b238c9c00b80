//! Middleware de autenticación JWT
//!
//! Extrae el token Bearer, lo valida y verifica que el usuario siga
//! activo antes de inyectar `AuthenticatedUser` en las extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::models::user::{User, UserRole, UserStatus};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{verify_token, JwtConfig};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(auth_header, &jwt_config)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Verificar que el usuario existe y sigue activo
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await
        .map_err(AppError::from_sqlx)?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if user.status != UserStatus::Active {
        return Err(AppError::Unauthorized(
            "Usuario inactivo o suspendido".to_string(),
        ));
    }

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Middleware para rutas reservadas a administradores
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != UserRole::Administrator {
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Middleware para mutaciones operativas (administradores y supervisores)
pub async fn supervisor_or_admin_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match user.role {
        UserRole::Administrator | UserRole::Supervisor => Ok(next.run(request).await),
        UserRole::Operator => Err(AppError::Forbidden(
            "Se requieren permisos de supervisor".to_string(),
        )),
    }
}
