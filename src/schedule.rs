use chrono::NaiveTime;
use log::info;
use sqlx::SqlitePool;

use crate::auth::new_id;
use crate::error::ScheduleError;
use crate::models::{ScheduleSlotDetail, ScheduleSlotRow, Weekday};
use crate::store::{doctors, schedules};

/// Admin input for creating or replacing a working window.
#[derive(Clone, Debug)]
pub struct ScheduleSlotInput {
    pub doctor_id: String,
    pub weekday: Weekday,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub break_starts_at: Option<NaiveTime>,
    pub break_ends_at: Option<NaiveTime>,
}

fn validate_window(input: &ScheduleSlotInput) -> Result<(), ScheduleError> {
    if input.ends_at <= input.starts_at {
        return Err(ScheduleError::InvalidWindow);
    }
    match (input.break_starts_at, input.break_ends_at) {
        (None, None) => Ok(()),
        (Some(break_start), Some(break_end)) => {
            if break_end <= break_start
                || break_start < input.starts_at
                || break_end > input.ends_at
            {
                Err(ScheduleError::InvalidBreak)
            } else {
                Ok(())
            }
        }
        _ => Err(ScheduleError::InvalidBreak),
    }
}

fn to_row(id: String, input: &ScheduleSlotInput) -> schedules::NewScheduleSlot {
    schedules::NewScheduleSlot {
        id,
        doctor_id: input.doctor_id.clone(),
        weekday: input.weekday,
        starts_at: input.starts_at,
        ends_at: input.ends_at,
        break_starts_at: input.break_starts_at,
        break_ends_at: input.break_ends_at,
    }
}

pub async fn create_slot(
    pool: &SqlitePool,
    input: &ScheduleSlotInput,
) -> Result<String, ScheduleError> {
    validate_window(input)?;
    if doctors::get(pool, &input.doctor_id).await?.is_none() {
        return Err(ScheduleError::DoctorNotFound);
    }

    let slot = to_row(new_id(), input);
    schedules::insert(pool, &slot).await?;
    info!("schedule slot {} added for doctor {}", slot.id, input.doctor_id);
    Ok(slot.id)
}

pub async fn update_slot(
    pool: &SqlitePool,
    slot_id: &str,
    input: &ScheduleSlotInput,
) -> Result<(), ScheduleError> {
    validate_window(input)?;
    if doctors::get(pool, &input.doctor_id).await?.is_none() {
        return Err(ScheduleError::DoctorNotFound);
    }

    let updated = schedules::update(pool, slot_id, &to_row(slot_id.to_string(), input)).await?;
    if !updated {
        return Err(ScheduleError::NotFound);
    }
    Ok(())
}

pub async fn remove_slot(pool: &SqlitePool, slot_id: &str) -> Result<(), ScheduleError> {
    if !schedules::delete(pool, slot_id).await? {
        return Err(ScheduleError::NotFound);
    }
    info!("schedule slot {slot_id} removed");
    Ok(())
}

/// Doctor-side toggle: deactivated windows stop contributing booking marks
/// but stay on record.
pub async fn set_slot_active(
    pool: &SqlitePool,
    slot_id: &str,
    active: bool,
) -> Result<(), ScheduleError> {
    if !schedules::set_active(pool, slot_id, active).await? {
        return Err(ScheduleError::NotFound);
    }
    Ok(())
}

pub async fn list_slots(pool: &SqlitePool) -> Result<Vec<ScheduleSlotDetail>, ScheduleError> {
    Ok(schedules::list_all(pool).await?)
}

pub async fn doctor_slots(
    pool: &SqlitePool,
    doctor_id: &str,
) -> Result<Vec<ScheduleSlotRow>, ScheduleError> {
    Ok(schedules::for_doctor(pool, doctor_id).await?)
}
