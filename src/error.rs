use crate::models::AppointmentStatus;

/// Errors surfaced by login and registration.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("a user with this email already exists")]
    EmailTaken,

    #[error("email is required")]
    MissingEmail,

    #[error("first and last name are required")]
    MissingName,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("storage error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Errors surfaced by the booking service and the appointment lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("patient not found or not active")]
    PatientNotFound,

    #[error("doctor not found or not active")]
    DoctorNotFound,

    #[error("cannot book an appointment on a past date")]
    DateInPast,

    #[error("the selected time is already taken, please pick another slot")]
    SlotTaken,

    #[error("appointment not found")]
    AppointmentNotFound,

    #[error("this appointment is already cancelled")]
    AlreadyCancelled,

    #[error("this appointment is already completed")]
    AlreadyCompleted,

    #[error("cannot move appointment from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("a cancellation reason is required")]
    MissingReason,

    #[error("a diagnosis is required to complete an appointment")]
    MissingDiagnosis,

    #[error("storage error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Errors surfaced by the schedule manager.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("schedule slot not found")]
    NotFound,

    #[error("doctor not found")]
    DoctorNotFound,

    #[error("working window must end after it starts")]
    InvalidWindow,

    #[error("break must fall inside the working window")]
    InvalidBreak,

    #[error("storage error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Errors surfaced by review submission and moderation.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("appointment not found")]
    AppointmentNotFound,

    #[error("only completed appointments can be reviewed")]
    NotCompleted,

    #[error("this appointment already has a review")]
    AlreadyReviewed,

    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("only an admin can approve reviews")]
    NotPermitted,

    #[error("review not found")]
    NotFound,

    #[error("storage error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// True when the storage engine rejected a write on a unique index, e.g. two
/// bookings racing for the same slot or two registrations for one email.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}
