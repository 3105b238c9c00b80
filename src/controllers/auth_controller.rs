//! Controlador de autenticación
//!
//! Login con bcrypt + emisión de JWT, y registro de usuarios del panel.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

const BCRYPT_COST: u32 = 10;

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    /// Autenticar credenciales y emitir un token.
    ///
    /// Credenciales inválidas y usuario inexistente responden con el mismo
    /// mensaje para no filtrar qué emails están registrados.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = match self.repository.find_active_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                return Ok(LoginResponse::error("Credenciales inválidas".to_string()));
            }
        };

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            return Ok(LoginResponse::error("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, &user.email, user.role.as_str(), &self.jwt_config)?;

        self.repository.touch_last_access(user.id).await?;

        log::info!("Login exitoso: {}", user.email);

        Ok(LoginResponse::success(token, UserResponse::from(user)))
    }

    /// Registrar un usuario nuevo del panel
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let password_hash =
            bcrypt::hash(&request.password, BCRYPT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(request.full_name, request.email, password_hash, request.role)
            .await?;

        log::info!("Usuario registrado: {} ({})", user.email, user.role.as_str());

        Ok(UserResponse::from(user))
    }
}
