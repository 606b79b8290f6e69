use sqlx::SqlitePool;

use crate::auth::new_id;
use crate::models::{DoctorProfile, DoctorRow, DoctorStatus, SpecializationRow};

const DOCTOR_COLUMNS: &str =
    "id, user_id, specialization_id, license, insurance, program, rating, status";

const PROFILE_SELECT: &str = r#"SELECT d.id, d.user_id,
       (u.first_name || ' ' || u.last_name) AS doctor_name,
       s.name AS specialization, s.category AS category,
       d.rating, d.status
FROM doctors d
JOIN users u ON d.user_id = u.id
JOIN specializations s ON d.specialization_id = s.id"#;

pub struct NewDoctor {
    pub id: String,
    pub user_id: String,
    pub specialization_id: String,
    pub license: String,
    pub insurance: String,
    pub program: String,
    pub rating: f64,
}

pub async fn insert(pool: &SqlitePool, doctor: &NewDoctor) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO doctors (id, user_id, specialization_id, license, insurance, program, rating, status)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&doctor.id)
    .bind(&doctor.user_id)
    .bind(&doctor.specialization_id)
    .bind(&doctor.license)
    .bind(&doctor.insurance)
    .bind(&doctor.program)
    .bind(doctor.rating)
    .bind(DoctorStatus::Active)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<DoctorRow>, sqlx::Error> {
    sqlx::query_as::<_, DoctorRow>(&format!(
        "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ? LIMIT 1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_by_user(pool: &SqlitePool, user_id: &str) -> Result<Option<DoctorRow>, sqlx::Error> {
    sqlx::query_as::<_, DoctorRow>(&format!(
        "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE user_id = ? LIMIT 1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Directory of bookable doctors: active profile on an active account.
pub async fn list_active(pool: &SqlitePool) -> Result<Vec<DoctorProfile>, sqlx::Error> {
    sqlx::query_as::<_, DoctorProfile>(&format!(
        "{PROFILE_SELECT}\nWHERE d.status = ? AND u.active = 1\nORDER BY doctor_name"
    ))
    .bind(DoctorStatus::Active)
    .fetch_all(pool)
    .await
}

/// Substring search over doctor name and specialization, case-insensitive.
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<DoctorProfile>, sqlx::Error> {
    let pattern = format!("%{}%", term.trim().to_lowercase());
    sqlx::query_as::<_, DoctorProfile>(&format!(
        "{PROFILE_SELECT}\nWHERE d.status = ? AND u.active = 1\n  AND (LOWER(u.first_name) LIKE ? OR LOWER(u.last_name) LIKE ?\n       OR LOWER(s.name) LIKE ? OR LOWER(s.description) LIKE ?)\nORDER BY doctor_name"
    ))
    .bind(DoctorStatus::Active)
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await
}

pub async fn set_status(
    pool: &SqlitePool,
    id: &str,
    status: DoctorStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE doctors SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_specialization(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    category: &str,
) -> Result<String, sqlx::Error> {
    let id = new_id();
    sqlx::query("INSERT INTO specializations (id, name, description, category) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(description)
        .bind(category)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn list_specializations(pool: &SqlitePool) -> Result<Vec<SpecializationRow>, sqlx::Error> {
    sqlx::query_as::<_, SpecializationRow>(
        "SELECT id, name, description, category FROM specializations ORDER BY name",
    )
    .fetch_all(pool)
    .await
}
