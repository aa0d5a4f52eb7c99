use std::sync::Arc;

use bcrypt::{hash, verify};
use crate::errors::{AppError, AppResult};
use crate::models::{provided, User};
use crate::services::{next_id, JsonStore, SessionVerifier};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<JsonStore<User>>,
    sessions: SessionVerifier,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<JsonStore<User>>, sessions: SessionVerifier, bcrypt_cost: u32) -> Self {
        Self {
            users,
            sessions,
            bcrypt_cost,
        }
    }

    /// Registers a new user and returns its id.
    pub async fn register(
        &self,
        usuario: Option<String>,
        contrasena: Option<String>,
    ) -> AppResult<u64> {
        let (usuario, contrasena) = match (provided(usuario), provided(contrasena)) {
            (Some(u), Some(c)) => (u, c),
            _ => return Err(AppError::MissingCredentials),
        };

        // Cheap rejection before paying for the hash, checked again under the lock below
        if self.users.load_all().await?.iter().any(|u| u.usuario == usuario) {
            tracing::warn!("Registration rejected, username taken: {}", usuario);
            return Err(AppError::DuplicateUsername);
        }

        // Hash outside the store lock, bcrypt is slow on purpose
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(contrasena, cost)).await??;

        let id = self
            .users
            .update(move |users| {
                if users.iter().any(|u| u.usuario == usuario) {
                    tracing::warn!("Registration rejected, username taken: {}", usuario);
                    return Err(AppError::DuplicateUsername);
                }
                let id = next_id(users.iter().map(|u| u.id));
                tracing::info!("Registered user {} with id {}", usuario, id);
                users.push(User {
                    id,
                    usuario,
                    password_hash,
                });
                Ok(id)
            })
            .await?;

        Ok(id)
    }

    /// Checks credentials and issues a session token.
    pub async fn login(
        &self,
        usuario: Option<String>,
        contrasena: Option<String>,
    ) -> AppResult<String> {
        let (usuario, contrasena) = match (provided(usuario), provided(contrasena)) {
            (Some(u), Some(c)) => (u, c),
            _ => return Err(AppError::MissingCredentials),
        };
        tracing::debug!("Login attempt for user: {}", usuario);

        let user = self
            .users
            .load_all()
            .await?
            .into_iter()
            .find(|u| u.usuario == usuario)
            .ok_or_else(|| {
                tracing::warn!("User not found: {}", usuario);
                AppError::UserNotFound
            })?;

        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify(contrasena, &stored_hash)).await??;
        if !matches {
            tracing::warn!("Invalid password for user: {}", usuario);
            return Err(AppError::InvalidSecret);
        }

        let token = self.sessions.issue(&user)?;
        tracing::info!("User {} logged in", usuario);
        Ok(token)
    }
}
