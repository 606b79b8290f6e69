use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Access category of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an appointment. `CancelRequested` is the flag a doctor
/// sets on a scheduled appointment; only an admin turns it into `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    CancelRequested,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::CancelRequested => "cancel_requested",
        }
    }

    /// Any status other than cancelled holds its (doctor, date, time) slot.
    pub fn occupies_slot(&self) -> bool {
        *self != AppointmentStatus::Cancelled
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Active,
    Inactive,
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DoctorStatus::Active => "active",
            DoctorStatus::Inactive => "inactive",
        })
    }
}

/// Day of week a schedule slot applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub registered_at: String,
    pub active: bool,
}

impl UserRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SpecializationRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DoctorRow {
    pub id: String,
    pub user_id: String,
    pub specialization_id: String,
    pub license: String,
    pub insurance: String,
    pub program: String,
    pub rating: f64,
    pub status: DoctorStatus,
}

/// Directory entry for the "pick a doctor" view: doctor joined with the
/// owning user and specialization.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DoctorProfile {
    pub id: String,
    pub user_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub category: String,
    pub rating: f64,
    pub status: DoctorStatus,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MedicalRecordRow {
    pub id: String,
    pub patient_id: String,
    pub blood_type: String,
    pub allergies: String,
    pub chronic_conditions: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppointmentRow {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub status: AppointmentStatus,
    pub symptoms: String,
    pub diagnosis: String,
    pub recommendations: String,
    pub created_at: String,
}

/// Appointment joined with patient, doctor and specialization names, the
/// projection appointment listings are rendered from.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AppointmentDetail {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub status: AppointmentStatus,
    pub symptoms: String,
    pub diagnosis: String,
    pub recommendations: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ScheduleSlotRow {
    pub id: String,
    pub doctor_id: String,
    pub weekday: Weekday,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub break_starts_at: Option<NaiveTime>,
    pub break_ends_at: Option<NaiveTime>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ScheduleSlotDetail {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub weekday: Weekday,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub break_starts_at: Option<NaiveTime>,
    pub break_ends_at: Option<NaiveTime>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: String,
    pub appointment_id: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: String,
    pub approved: bool,
}
