use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::entities::admin::AdminSession;
use crate::domain::validation::FieldError;
use crate::usecase::ports::repo::{ElectionRepository, RepoError};

pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;
pub const MIN_PASSWORD_LEN: usize = 8;
const SALT_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

pub struct AuthService {
    repo: Arc<dyn ElectionRepository>,
    iterations: u32,
}

impl AuthService {
    pub fn new(repo: Arc<dyn ElectionRepository>) -> Self {
        Self::with_iterations(repo, DEFAULT_PBKDF2_ITERATIONS)
    }

    pub fn with_iterations(repo: Arc<dyn ElectionRepository>, iterations: u32) -> Self {
        Self { repo, iterations }
    }

    /// Returns `(hash, salt)`, both base64.
    pub fn hash_password(&self, password: &str) -> (String, String) {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let key = derive_key(password, &salt, self.iterations);
        (B64.encode(key), B64.encode(salt))
    }

    pub fn verify_password(&self, password: &str, hash: &str, salt: &str) -> bool {
        let (Ok(expected), Ok(salt)) = (B64.decode(hash), B64.decode(salt)) else {
            return false;
        };
        let key = derive_key(password, &salt, self.iterations);
        constant_time_eq(&key, &expected)
    }

    /// Creates the first admin when the table is empty. Returns whether one was created.
    pub fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.repo.count_admins()? > 0 {
            return Ok(false);
        }
        let (hash, salt) = self.hash_password(password);
        self.repo.insert_admin(username, &hash, &salt)?;
        info!(username, "seeded initial admin account");
        Ok(true)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        let username = username.trim();
        let Some(admin) = self.repo.find_admin(username)? else {
            warn!(username, "login rejected: unknown admin");
            return Err(AuthError::InvalidCredentials);
        };
        if !self.verify_password(password, &admin.password_hash, &admin.salt) {
            warn!(username, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        info!(username, "admin logged in");
        Ok(AdminSession {
            admin_id: admin.id,
            username: admin.username,
            started_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        })
    }

    pub fn change_password(
        &self,
        session: &AdminSession,
        form: &PasswordChangeForm,
    ) -> Result<(), AuthError> {
        let Some(admin) = self.repo.find_admin(&session.username)? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !self.verify_password(&form.current_password, &admin.password_hash, &admin.salt) {
            return Err(FieldError::new("current_password", "Current password is incorrect.").into());
        }
        if form.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FieldError::new(
                "new_password",
                format!("Use at least {MIN_PASSWORD_LEN} characters."),
            )
            .into());
        }
        if form.new_password != form.confirm_password {
            return Err(FieldError::new("confirm_password", "Passwords do not match.").into());
        }

        let (hash, salt) = self.hash_password(&form.new_password);
        self.repo.update_admin_password(admin.id, &hash, &salt)?;
        info!(username = %session.username, "admin password changed");
        Ok(())
    }
}
