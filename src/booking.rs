use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use log::info;
use sqlx::SqlitePool;

use crate::auth::{new_id, AuthUser};
use crate::error::{is_unique_violation, BookingError};
use crate::lifecycle;
use crate::models::{AppointmentRow, AppointmentStatus, DoctorStatus, Role, Weekday};
use crate::store::{appointments, doctors, schedules, users};

/// Fallback booking grid when a doctor has no schedule row for the day:
/// 09:00-17:00 with a 12:30-13:00 lunch gap.
const DEFAULT_OPEN: (u32, u32) = (9, 0);
const DEFAULT_CLOSE: (u32, u32) = (17, 0);
const DEFAULT_BREAK: ((u32, u32), (u32, u32)) = ((12, 30), (13, 0));

#[derive(Clone, Debug)]
pub struct BookingRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub symptoms: String,
}

/// Book a slot. Validation short-circuits in a fixed order: patient, doctor,
/// date, slot. The partial unique index backs up the slot pre-check, so a
/// lost race still surfaces as `SlotTaken` instead of a stored double
/// booking.
pub async fn create_appointment(
    pool: &SqlitePool,
    request: &BookingRequest,
) -> Result<String, BookingError> {
    let patient = users::get(pool, &request.patient_id).await?;
    if !matches!(&patient, Some(user) if user.role == Role::Patient && user.active) {
        return Err(BookingError::PatientNotFound);
    }

    let doctor = doctors::get(pool, &request.doctor_id).await?;
    if !matches!(&doctor, Some(doctor) if doctor.status == DoctorStatus::Active) {
        return Err(BookingError::DoctorNotFound);
    }

    if request.date < Utc::now().date_naive() {
        return Err(BookingError::DateInPast);
    }

    if !appointments::slot_is_free(pool, &request.doctor_id, request.date, request.time).await? {
        return Err(BookingError::SlotTaken);
    }

    let appointment = appointments::NewAppointment {
        id: new_id(),
        patient_id: request.patient_id.clone(),
        doctor_id: request.doctor_id.clone(),
        visit_date: request.date,
        visit_time: request.time,
        symptoms: request.symptoms.trim().to_string(),
    };

    match appointments::insert(pool, &appointment).await {
        Ok(()) => {}
        Err(err) if is_unique_violation(&err) => return Err(BookingError::SlotTaken),
        Err(err) => return Err(err.into()),
    }

    info!(
        "appointment {} booked: doctor {} on {} at {}",
        appointment.id, request.doctor_id, request.date, request.time
    );
    Ok(appointment.id)
}

/// Cancel outright. Allowed to the owning patient or an admin; doctors go
/// through `request_cancellation` instead. The reason is mandatory and is
/// appended to the symptoms text for audit.
pub async fn cancel_appointment(
    pool: &SqlitePool,
    actor: &AuthUser,
    appointment_id: &str,
    reason: &str,
) -> Result<(), BookingError> {
    let appointment = require(pool, appointment_id).await?;
    if appointment.status == AppointmentStatus::Cancelled {
        return Err(BookingError::AlreadyCancelled);
    }

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(BookingError::MissingReason);
    }

    lifecycle::validate_transition(appointment.status, AppointmentStatus::Cancelled)?;

    let owns = actor.role == Role::Admin
        || (actor.role == Role::Patient && appointment.patient_id == actor.id);
    if !owns {
        return Err(BookingError::InvalidTransition {
            from: appointment.status,
            to: AppointmentStatus::Cancelled,
        });
    }

    appointments::cancel_with_reason(pool, appointment_id, reason).await?;
    info!("appointment {appointment_id} cancelled by {} ({})", actor.display_name, actor.role);
    Ok(())
}

/// A doctor flags their own scheduled appointment for cancellation; an admin
/// later confirms via `approve_cancellation`.
pub async fn request_cancellation(
    pool: &SqlitePool,
    actor: &AuthUser,
    appointment_id: &str,
) -> Result<(), BookingError> {
    let appointment = require(pool, appointment_id).await?;
    if appointment.status == AppointmentStatus::Cancelled {
        return Err(BookingError::AlreadyCancelled);
    }

    lifecycle::validate_transition(appointment.status, AppointmentStatus::CancelRequested)?;

    if !is_owning_doctor(pool, actor, &appointment).await? {
        return Err(BookingError::InvalidTransition {
            from: appointment.status,
            to: AppointmentStatus::CancelRequested,
        });
    }

    appointments::set_status(pool, appointment_id, AppointmentStatus::CancelRequested).await?;
    info!("appointment {appointment_id} flagged for cancellation by {}", actor.display_name);
    Ok(())
}

/// Admin confirmation of a doctor-flagged cancellation.
pub async fn approve_cancellation(
    pool: &SqlitePool,
    actor: &AuthUser,
    appointment_id: &str,
) -> Result<(), BookingError> {
    let appointment = require(pool, appointment_id).await?;
    if appointment.status == AppointmentStatus::Cancelled {
        return Err(BookingError::AlreadyCancelled);
    }

    lifecycle::validate_transition(appointment.status, AppointmentStatus::Cancelled)?;

    if actor.role != Role::Admin || appointment.status != AppointmentStatus::CancelRequested {
        return Err(BookingError::InvalidTransition {
            from: appointment.status,
            to: AppointmentStatus::Cancelled,
        });
    }

    appointments::set_status(pool, appointment_id, AppointmentStatus::Cancelled).await?;
    info!("cancellation of appointment {appointment_id} approved by {}", actor.display_name);
    Ok(())
}

/// Close out a visit. Owning doctor only; diagnosis is mandatory,
/// recommendations optional.
pub async fn complete_appointment(
    pool: &SqlitePool,
    actor: &AuthUser,
    appointment_id: &str,
    diagnosis: &str,
    recommendations: &str,
) -> Result<(), BookingError> {
    let appointment = require(pool, appointment_id).await?;
    if appointment.status == AppointmentStatus::Completed {
        return Err(BookingError::AlreadyCompleted);
    }

    let diagnosis = diagnosis.trim();
    if diagnosis.is_empty() {
        return Err(BookingError::MissingDiagnosis);
    }

    lifecycle::validate_transition(appointment.status, AppointmentStatus::Completed)?;

    if !is_owning_doctor(pool, actor, &appointment).await? {
        return Err(BookingError::InvalidTransition {
            from: appointment.status,
            to: AppointmentStatus::Completed,
        });
    }

    appointments::complete(pool, appointment_id, diagnosis, recommendations.trim()).await?;
    info!("appointment {appointment_id} completed by {}", actor.display_name);
    Ok(())
}

/// Half-hour marks a caller may offer for (doctor, date): the doctor's
/// active windows for that weekday minus break and already-taken times, or
/// the default grid when no schedule is defined.
pub async fn available_slots(
    pool: &SqlitePool,
    doctor_id: &str,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>, BookingError> {
    let windows = schedules::windows_for(pool, doctor_id, Weekday::from(date.weekday())).await?;
    let taken = appointments::taken_times(pool, doctor_id, date).await?;

    let mut slots: Vec<NaiveTime> = Vec::new();
    if windows.is_empty() {
        slots.extend(half_hour_marks(
            minutes(DEFAULT_OPEN),
            minutes(DEFAULT_CLOSE),
            Some((minutes(DEFAULT_BREAK.0), minutes(DEFAULT_BREAK.1))),
        ));
    } else {
        for window in &windows {
            let pause = match (window.break_starts_at, window.break_ends_at) {
                (Some(start), Some(end)) => Some((minutes_of(start), minutes_of(end))),
                _ => None,
            };
            slots.extend(half_hour_marks(
                minutes_of(window.starts_at),
                minutes_of(window.ends_at),
                pause,
            ));
        }
    }

    slots.sort();
    slots.dedup();
    slots.retain(|slot| !taken.contains(slot));
    Ok(slots)
}

async fn require(pool: &SqlitePool, appointment_id: &str) -> Result<AppointmentRow, BookingError> {
    appointments::get(pool, appointment_id)
        .await?
        .ok_or(BookingError::AppointmentNotFound)
}

async fn is_owning_doctor(
    pool: &SqlitePool,
    actor: &AuthUser,
    appointment: &AppointmentRow,
) -> Result<bool, BookingError> {
    if actor.role != Role::Doctor {
        return Ok(false);
    }
    let doctor = doctors::get(pool, &appointment.doctor_id).await?;
    Ok(matches!(doctor, Some(doctor) if doctor.user_id == actor.id))
}

fn minutes((hour, minute): (u32, u32)) -> u32 {
    hour * 60 + minute
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn half_hour_marks(
    start: u32,
    end: u32,
    pause: Option<(u32, u32)>,
) -> impl Iterator<Item = NaiveTime> {
    (start..end)
        .step_by(30)
        .filter(move |mark| match pause {
            Some((pause_start, pause_end)) => *mark < pause_start || *mark >= pause_end,
            None => true,
        })
        .filter_map(|mark| NaiveTime::from_hms_opt(mark / 60, mark % 60, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn default_grid_matches_booking_form() {
        let marks: Vec<NaiveTime> = half_hour_marks(
            minutes(DEFAULT_OPEN),
            minutes(DEFAULT_CLOSE),
            Some((minutes(DEFAULT_BREAK.0), minutes(DEFAULT_BREAK.1))),
        )
        .collect();

        assert_eq!(marks.first(), Some(&hm(9, 0)));
        assert_eq!(marks.last(), Some(&hm(16, 30)));
        assert!(!marks.contains(&hm(12, 30)));
        assert!(marks.contains(&hm(12, 0)));
        assert!(marks.contains(&hm(13, 0)));
        assert_eq!(marks.len(), 15);
    }

    #[test]
    fn break_window_is_skipped() {
        let marks: Vec<NaiveTime> =
            half_hour_marks(minutes((9, 0)), minutes((18, 0)), Some((minutes((13, 0)), minutes((14, 0)))))
                .collect();
        assert!(!marks.contains(&hm(13, 0)));
        assert!(!marks.contains(&hm(13, 30)));
        assert!(marks.contains(&hm(14, 0)));
        assert!(marks.contains(&hm(17, 30)));
        assert!(!marks.contains(&hm(18, 0)));
    }
}
