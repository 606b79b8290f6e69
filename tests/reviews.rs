mod common;

use clinicdesk::booking::{self, BookingRequest};
use clinicdesk::error::ReviewError;
use clinicdesk::reviews;

use common::{at, clinic, tomorrow};

async fn booked_appointment(clinic: &common::Clinic) -> String {
    booking::create_appointment(
        &clinic.pool,
        &BookingRequest {
            patient_id: clinic.patient.id.clone(),
            doctor_id: clinic.doctor_id.clone(),
            date: tomorrow(),
            time: at(9, 0),
            symptoms: "checkup".to_string(),
        },
    )
    .await
    .expect("booking")
}

#[tokio::test]
async fn only_completed_visits_can_be_reviewed() {
    let clinic = clinic().await;
    let pool = &clinic.pool;

    let id = booked_appointment(&clinic).await;
    let early = reviews::submit_review(pool, &id, 5, "great").await;
    assert!(matches!(early, Err(ReviewError::NotCompleted)));

    let missing = reviews::submit_review(pool, "nope", 5, "great").await;
    assert!(matches!(missing, Err(ReviewError::AppointmentNotFound)));
}

#[tokio::test]
async fn review_moderation_flow() {
    let clinic = clinic().await;
    let pool = &clinic.pool;

    let id = booked_appointment(&clinic).await;
    booking::complete_appointment(pool, &clinic.doctor_user, &id, "all clear", "")
        .await
        .unwrap();

    assert!(matches!(
        reviews::submit_review(pool, &id, 6, "great").await,
        Err(ReviewError::RatingOutOfRange)
    ));
    assert!(matches!(
        reviews::submit_review(pool, &id, 0, "great").await,
        Err(ReviewError::RatingOutOfRange)
    ));

    let review_id = reviews::submit_review(pool, &id, 5, "very thorough").await.unwrap();

    let duplicate = reviews::submit_review(pool, &id, 4, "again").await;
    assert!(matches!(duplicate, Err(ReviewError::AlreadyReviewed)));

    // Unapproved reviews stay out of the public listing.
    assert!(reviews::doctor_reviews(pool, &clinic.doctor_id).await.unwrap().is_empty());

    let as_patient = reviews::approve_review(pool, &clinic.patient, &review_id).await;
    assert!(matches!(as_patient, Err(ReviewError::NotPermitted)));

    reviews::approve_review(pool, &clinic.admin, &review_id).await.unwrap();
    let listed = reviews::doctor_reviews(pool, &clinic.doctor_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].rating, 5);
    assert_eq!(listed[0].comment, "very thorough");
    assert!(listed[0].approved);
}
