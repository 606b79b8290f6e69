use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::ReviewRow;

const REVIEW_COLUMNS: &str = "id, appointment_id, rating, comment, created_at, approved";

pub async fn insert(
    pool: &SqlitePool,
    id: &str,
    appointment_id: &str,
    rating: i64,
    comment: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO reviews (id, appointment_id, rating, comment, created_at, approved)
           VALUES (?, ?, ?, ?, ?, 0)"#,
    )
    .bind(id)
    .bind(appointment_id)
    .bind(rating)
    .bind(comment)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn for_appointment(
    pool: &SqlitePool,
    appointment_id: &str,
) -> Result<Option<ReviewRow>, sqlx::Error> {
    sqlx::query_as::<_, ReviewRow>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE appointment_id = ? LIMIT 1"
    ))
    .bind(appointment_id)
    .fetch_optional(pool)
    .await
}

pub async fn approve(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE reviews SET approved = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Approved reviews for a doctor, newest first.
pub async fn approved_for_doctor(
    pool: &SqlitePool,
    doctor_id: &str,
) -> Result<Vec<ReviewRow>, sqlx::Error> {
    sqlx::query_as::<_, ReviewRow>(
        r#"SELECT r.id, r.appointment_id, r.rating, r.comment, r.created_at, r.approved
           FROM reviews r
           JOIN appointments a ON r.appointment_id = a.id
           WHERE a.doctor_id = ? AND r.approved = 1
           ORDER BY r.created_at DESC"#,
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await
}
