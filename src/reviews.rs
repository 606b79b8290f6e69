use log::info;
use sqlx::SqlitePool;

use crate::auth::{new_id, AuthUser};
use crate::error::{is_unique_violation, ReviewError};
use crate::models::{AppointmentStatus, ReviewRow, Role};
use crate::store::{appointments, reviews};

/// Leave a review on a completed visit. One review per appointment; it stays
/// hidden until an admin approves it.
pub async fn submit_review(
    pool: &SqlitePool,
    appointment_id: &str,
    rating: i64,
    comment: &str,
) -> Result<String, ReviewError> {
    if !(1..=5).contains(&rating) {
        return Err(ReviewError::RatingOutOfRange);
    }

    let appointment = appointments::get(pool, appointment_id)
        .await?
        .ok_or(ReviewError::AppointmentNotFound)?;
    if appointment.status != AppointmentStatus::Completed {
        return Err(ReviewError::NotCompleted);
    }

    if reviews::for_appointment(pool, appointment_id).await?.is_some() {
        return Err(ReviewError::AlreadyReviewed);
    }

    let id = new_id();
    match reviews::insert(pool, &id, appointment_id, rating, comment.trim()).await {
        Ok(()) => {
            info!("review {id} submitted for appointment {appointment_id}");
            Ok(id)
        }
        Err(err) if is_unique_violation(&err) => Err(ReviewError::AlreadyReviewed),
        Err(err) => Err(err.into()),
    }
}

pub async fn approve_review(
    pool: &SqlitePool,
    actor: &AuthUser,
    review_id: &str,
) -> Result<(), ReviewError> {
    if actor.role != Role::Admin {
        return Err(ReviewError::NotPermitted);
    }
    if !reviews::approve(pool, review_id).await? {
        return Err(ReviewError::NotFound);
    }
    info!("review {review_id} approved by {}", actor.display_name);
    Ok(())
}

pub async fn doctor_reviews(
    pool: &SqlitePool,
    doctor_id: &str,
) -> Result<Vec<ReviewRow>, ReviewError> {
    Ok(reviews::approved_for_doctor(pool, doctor_id).await?)
}
