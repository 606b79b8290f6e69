//! Thin SQL layer over the clinic tables. Services own the business rules;
//! everything here returns raw `sqlx` results.

pub mod appointments;
pub mod doctors;
pub mod reviews;
pub mod schedules;
pub mod users;
