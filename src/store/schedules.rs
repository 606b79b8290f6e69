use chrono::NaiveTime;
use sqlx::SqlitePool;

use crate::models::{ScheduleSlotDetail, ScheduleSlotRow, Weekday};

const SLOT_COLUMNS: &str = "id, doctor_id, weekday, starts_at, ends_at, break_starts_at, \
                            break_ends_at, active";

pub struct NewScheduleSlot {
    pub id: String,
    pub doctor_id: String,
    pub weekday: Weekday,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub break_starts_at: Option<NaiveTime>,
    pub break_ends_at: Option<NaiveTime>,
}

pub async fn insert(pool: &SqlitePool, slot: &NewScheduleSlot) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO schedule_slots
           (id, doctor_id, weekday, starts_at, ends_at, break_starts_at, break_ends_at, active)
           VALUES (?, ?, ?, ?, ?, ?, ?, 1)"#,
    )
    .bind(&slot.id)
    .bind(&slot.doctor_id)
    .bind(slot.weekday)
    .bind(slot.starts_at)
    .bind(slot.ends_at)
    .bind(slot.break_starts_at)
    .bind(slot.break_ends_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<ScheduleSlotRow>, sqlx::Error> {
    sqlx::query_as::<_, ScheduleSlotRow>(&format!(
        "SELECT {SLOT_COLUMNS} FROM schedule_slots WHERE id = ? LIMIT 1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update(pool: &SqlitePool, id: &str, slot: &NewScheduleSlot) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE schedule_slots
           SET doctor_id = ?, weekday = ?, starts_at = ?, ends_at = ?,
               break_starts_at = ?, break_ends_at = ?
           WHERE id = ?"#,
    )
    .bind(&slot.doctor_id)
    .bind(slot.weekday)
    .bind(slot.starts_at)
    .bind(slot.ends_at)
    .bind(slot.break_starts_at)
    .bind(slot.break_ends_at)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM schedule_slots WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_active(pool: &SqlitePool, id: &str, active: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE schedule_slots SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Full listing for the admin schedule panel, joined with doctor names.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ScheduleSlotDetail>, sqlx::Error> {
    sqlx::query_as::<_, ScheduleSlotDetail>(
        r#"SELECT t.id, t.doctor_id,
                  (u.first_name || ' ' || u.last_name) AS doctor_name,
                  t.weekday, t.starts_at, t.ends_at, t.break_starts_at, t.break_ends_at, t.active
           FROM schedule_slots t
           JOIN doctors d ON t.doctor_id = d.id
           JOIN users u ON d.user_id = u.id
           ORDER BY doctor_name, t.weekday, t.starts_at"#,
    )
    .fetch_all(pool)
    .await
}

pub async fn for_doctor(
    pool: &SqlitePool,
    doctor_id: &str,
) -> Result<Vec<ScheduleSlotRow>, sqlx::Error> {
    sqlx::query_as::<_, ScheduleSlotRow>(&format!(
        "SELECT {SLOT_COLUMNS} FROM schedule_slots WHERE doctor_id = ? AND active = 1 ORDER BY weekday, starts_at"
    ))
    .bind(doctor_id)
    .fetch_all(pool)
    .await
}

/// Active working windows for one doctor on one weekday.
pub async fn windows_for(
    pool: &SqlitePool,
    doctor_id: &str,
    weekday: Weekday,
) -> Result<Vec<ScheduleSlotRow>, sqlx::Error> {
    sqlx::query_as::<_, ScheduleSlotRow>(&format!(
        "SELECT {SLOT_COLUMNS} FROM schedule_slots WHERE doctor_id = ? AND weekday = ? AND active = 1 ORDER BY starts_at"
    ))
    .bind(doctor_id)
    .bind(weekday)
    .fetch_all(pool)
    .await
}
