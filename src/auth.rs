use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::NaiveDate;
use rand_core::OsRng;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{is_unique_violation, AuthError};
use crate::models::{Role, UserRow};
use crate::store::users;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Placeholder values a fresh medical record starts with.
const RECORD_UNSET: &str = "not specified";

/// Authenticated identity handed to the service layer by a caller.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub display_name: String,
    pub role: Role,
}

impl From<&UserRow> for AuthUser {
    fn from(user: &UserRow) -> Self {
        Self {
            id: user.id.clone(),
            display_name: user.full_name(),
            role: user.role,
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AuthError::Hashing(err.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = PasswordHash::new(password_hash);
    match parsed_hash {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Clone, Debug)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
}

/// Exact email match among active accounts, then password verification.
pub async fn login(pool: &SqlitePool, email: &str, password: &str) -> Result<AuthUser, AuthError> {
    let user = users::get_active_by_email(pool, email.trim()).await?;
    let user = match user {
        Some(user) => user,
        None => return Err(AuthError::InvalidCredentials),
    };

    if !verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    log::info!("user {} logged in as {}", user.email, user.role);
    Ok(AuthUser::from(&user))
}

/// Create an account. Patient-role registrants get an empty medical record;
/// a failure there does not fail the registration itself.
pub async fn register(pool: &SqlitePool, registration: &Registration) -> Result<String, AuthError> {
    let email = registration.email.trim();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    if registration.first_name.trim().is_empty() || registration.last_name.trim().is_empty() {
        return Err(AuthError::MissingName);
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    if registration.password != registration.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if users::email_exists(pool, email).await? {
        return Err(AuthError::EmailTaken);
    }

    let user = users::NewUser {
        id: new_id(),
        email: email.to_string(),
        password_hash: hash_password(&registration.password)?,
        role: registration.role,
        first_name: registration.first_name.trim().to_string(),
        last_name: registration.last_name.trim().to_string(),
        phone: registration.phone.trim().to_string(),
        birth_date: registration.birth_date,
    };

    match users::insert(pool, &user).await {
        Ok(()) => {}
        // Two registrations racing for one email; the unique column decides.
        Err(err) if is_unique_violation(&err) => return Err(AuthError::EmailTaken),
        Err(err) => return Err(err.into()),
    }

    if registration.role == Role::Patient {
        if let Err(err) =
            users::insert_medical_record(pool, &user.id, RECORD_UNSET, RECORD_UNSET, RECORD_UNSET)
                .await
        {
            log::warn!("could not create medical record for {email}: {err}");
        }
    }

    log::info!("registered {} ({})", email, registration.role);
    Ok(user.id)
}
