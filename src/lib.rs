//! Clinic registry core: accounts and roles, the doctor directory,
//! appointment booking with slot-conflict protection, the appointment
//! lifecycle, schedule management and reviews, persisted in a single SQLite
//! file. A UI layer consumes the services in `auth`, `booking`, `schedule`
//! and `reviews` as plain async calls; every error type renders the message
//! meant for the end user.

pub mod auth;
pub mod booking;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod reviews;
pub mod schedule;
pub mod store;

pub use auth::AuthUser;
pub use booking::BookingRequest;
pub use error::{AuthError, BookingError, ReviewError, ScheduleError};
pub use models::{AppointmentStatus, DoctorStatus, Role, Weekday};
