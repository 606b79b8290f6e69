use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;

use crate::models::{AppointmentDetail, AppointmentRow, AppointmentStatus};

const APPOINTMENT_COLUMNS: &str = "id, patient_id, doctor_id, visit_date, visit_time, status, \
                                   symptoms, diagnosis, recommendations, created_at";

const DETAIL_SELECT: &str = r#"SELECT a.id, a.patient_id,
       (p.first_name || ' ' || p.last_name) AS patient_name,
       a.doctor_id,
       (du.first_name || ' ' || du.last_name) AS doctor_name,
       s.name AS specialization,
       a.visit_date, a.visit_time, a.status,
       a.symptoms, a.diagnosis, a.recommendations, a.created_at
FROM appointments a
JOIN users p ON a.patient_id = p.id
JOIN doctors d ON a.doctor_id = d.id
JOIN users du ON d.user_id = du.id
JOIN specializations s ON d.specialization_id = s.id"#;

pub struct NewAppointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub symptoms: String,
}

pub async fn insert(pool: &SqlitePool, appointment: &NewAppointment) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO appointments
           (id, patient_id, doctor_id, visit_date, visit_time, status, symptoms, diagnosis, recommendations, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, '', '', ?)"#,
    )
    .bind(&appointment.id)
    .bind(&appointment.patient_id)
    .bind(&appointment.doctor_id)
    .bind(appointment.visit_date)
    .bind(appointment.visit_time)
    .bind(AppointmentStatus::Scheduled)
    .bind(&appointment.symptoms)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<AppointmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AppointmentRow>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ? LIMIT 1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn detail(pool: &SqlitePool, id: &str) -> Result<Option<AppointmentDetail>, sqlx::Error> {
    sqlx::query_as::<_, AppointmentDetail>(&format!("{DETAIL_SELECT}\nWHERE a.id = ?\nLIMIT 1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn for_patient(
    pool: &SqlitePool,
    patient_id: &str,
) -> Result<Vec<AppointmentDetail>, sqlx::Error> {
    sqlx::query_as::<_, AppointmentDetail>(&format!(
        "{DETAIL_SELECT}\nWHERE a.patient_id = ?\nORDER BY a.visit_date DESC, a.visit_time ASC"
    ))
    .bind(patient_id)
    .fetch_all(pool)
    .await
}

pub async fn for_doctor(
    pool: &SqlitePool,
    doctor_id: &str,
) -> Result<Vec<AppointmentDetail>, sqlx::Error> {
    sqlx::query_as::<_, AppointmentDetail>(&format!(
        "{DETAIL_SELECT}\nWHERE a.doctor_id = ?\nORDER BY a.visit_date DESC, a.visit_time ASC"
    ))
    .bind(doctor_id)
    .fetch_all(pool)
    .await
}

/// Day view, optionally narrowed to one doctor.
pub async fn on_date(
    pool: &SqlitePool,
    date: NaiveDate,
    doctor_id: Option<&str>,
) -> Result<Vec<AppointmentDetail>, sqlx::Error> {
    match doctor_id {
        Some(doctor_id) => {
            sqlx::query_as::<_, AppointmentDetail>(&format!(
                "{DETAIL_SELECT}\nWHERE a.visit_date = ? AND a.doctor_id = ?\nORDER BY a.visit_time ASC"
            ))
            .bind(date)
            .bind(doctor_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, AppointmentDetail>(&format!(
                "{DETAIL_SELECT}\nWHERE a.visit_date = ?\nORDER BY a.visit_time ASC"
            ))
            .bind(date)
            .fetch_all(pool)
            .await
        }
    }
}

/// True iff no non-cancelled appointment occupies the exact (doctor, date,
/// time) point. Times are discrete grid marks, not intervals.
pub async fn slot_is_free(
    pool: &SqlitePool,
    doctor_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<bool, sqlx::Error> {
    let occupied = sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM appointments
           WHERE doctor_id = ? AND visit_date = ? AND visit_time = ? AND status != ?"#,
    )
    .bind(doctor_id)
    .bind(date)
    .bind(time)
    .bind(AppointmentStatus::Cancelled)
    .fetch_one(pool)
    .await?;
    Ok(occupied == 0)
}

/// Times already held by non-cancelled appointments on the given day.
pub async fn taken_times(
    pool: &SqlitePool,
    doctor_id: &str,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>, sqlx::Error> {
    sqlx::query_scalar::<_, NaiveTime>(
        r#"SELECT visit_time FROM appointments
           WHERE doctor_id = ? AND visit_date = ? AND status != ?
           ORDER BY visit_time"#,
    )
    .bind(doctor_id)
    .bind(date)
    .bind(AppointmentStatus::Cancelled)
    .fetch_all(pool)
    .await
}

pub async fn set_status(
    pool: &SqlitePool,
    id: &str,
    status: AppointmentStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Cancel and append the reason to the symptoms text for audit; the reason
/// is not a first-class column.
pub async fn cancel_with_reason(
    pool: &SqlitePool,
    id: &str,
    reason: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE appointments
           SET status = ?, symptoms = symptoms || ' (cancellation reason: ' || ? || ')'
           WHERE id = ?"#,
    )
    .bind(AppointmentStatus::Cancelled)
    .bind(reason)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn complete(
    pool: &SqlitePool,
    id: &str,
    diagnosis: &str,
    recommendations: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE appointments SET status = ?, diagnosis = ?, recommendations = ? WHERE id = ?",
    )
    .bind(AppointmentStatus::Completed)
    .bind(diagnosis)
    .bind(recommendations)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
