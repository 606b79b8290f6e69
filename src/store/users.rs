use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::auth::new_id;
use crate::models::{MedicalRecordRow, Role, UserRow};

const USER_COLUMNS: &str = "id, email, password_hash, role, first_name, last_name, phone, \
                            birth_date, registered_at, active";

pub struct NewUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
}

pub async fn insert(pool: &SqlitePool, user: &NewUser) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO users (id, email, password_hash, role, first_name, last_name, phone, birth_date, registered_at, active)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1)"#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.phone)
    .bind(user.birth_date)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ? LIMIT 1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_active_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ? AND active = 1 LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Active patients, for the admin booking panel.
pub async fn list_patients(pool: &SqlitePool) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE role = ? AND active = 1 ORDER BY last_name, first_name"
    ))
    .bind(Role::Patient)
    .fetch_all(pool)
    .await
}

/// Soft-disable or re-enable an account; rows are never hard-deleted.
pub async fn set_active(pool: &SqlitePool, id: &str, active: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_medical_record(
    pool: &SqlitePool,
    patient_id: &str,
    blood_type: &str,
    allergies: &str,
    chronic_conditions: &str,
) -> Result<(), sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    sqlx::query(
        r#"INSERT INTO medical_records (id, patient_id, blood_type, allergies, chronic_conditions, created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(new_id())
    .bind(patient_id)
    .bind(blood_type)
    .bind(allergies)
    .bind(chronic_conditions)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn medical_record(
    pool: &SqlitePool,
    patient_id: &str,
) -> Result<Option<MedicalRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, MedicalRecordRow>(
        r#"SELECT id, patient_id, blood_type, allergies, chronic_conditions, created_at, updated_at
           FROM medical_records
           WHERE patient_id = ?
           LIMIT 1"#,
    )
    .bind(patient_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_medical_record(
    pool: &SqlitePool,
    patient_id: &str,
    blood_type: &str,
    allergies: &str,
    chronic_conditions: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE medical_records
           SET blood_type = ?, allergies = ?, chronic_conditions = ?, updated_at = ?
           WHERE patient_id = ?"#,
    )
    .bind(blood_type)
    .bind(allergies)
    .bind(chronic_conditions)
    .bind(Utc::now().to_rfc3339())
    .bind(patient_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
