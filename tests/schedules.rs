mod common;

use chrono::Datelike;

use clinicdesk::booking;
use clinicdesk::error::ScheduleError;
use clinicdesk::schedule::{self, ScheduleSlotInput};
use clinicdesk::Weekday;

use common::{at, clinic, tomorrow};

fn monday_input(doctor_id: &str) -> ScheduleSlotInput {
    ScheduleSlotInput {
        doctor_id: doctor_id.to_string(),
        weekday: Weekday::Monday,
        starts_at: at(9, 0),
        ends_at: at(18, 0),
        break_starts_at: Some(at(13, 0)),
        break_ends_at: Some(at(14, 0)),
    }
}

#[tokio::test]
async fn create_update_and_remove_a_slot() {
    let clinic = clinic().await;
    let pool = &clinic.pool;

    let slot_id = schedule::create_slot(pool, &monday_input(&clinic.doctor_id)).await.unwrap();

    let listed = schedule::list_slots(pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, slot_id);
    assert_eq!(listed[0].doctor_name, "Dana Meyer");
    assert_eq!(listed[0].weekday, Weekday::Monday);

    let mut input = monday_input(&clinic.doctor_id);
    input.weekday = Weekday::Friday;
    input.break_starts_at = None;
    input.break_ends_at = None;
    schedule::update_slot(pool, &slot_id, &input).await.unwrap();

    let slots = schedule::doctor_slots(pool, &clinic.doctor_id).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].weekday, Weekday::Friday);
    assert!(slots[0].break_starts_at.is_none());

    schedule::remove_slot(pool, &slot_id).await.unwrap();
    assert!(schedule::doctor_slots(pool, &clinic.doctor_id).await.unwrap().is_empty());

    let gone = schedule::remove_slot(pool, &slot_id).await;
    assert!(matches!(gone, Err(ScheduleError::NotFound)));
}

#[tokio::test]
async fn invalid_windows_are_rejected() {
    let clinic = clinic().await;
    let pool = &clinic.pool;

    let mut input = monday_input(&clinic.doctor_id);
    input.ends_at = at(8, 0);
    assert!(matches!(
        schedule::create_slot(pool, &input).await,
        Err(ScheduleError::InvalidWindow)
    ));

    let mut input = monday_input(&clinic.doctor_id);
    input.break_ends_at = Some(at(19, 0));
    assert!(matches!(
        schedule::create_slot(pool, &input).await,
        Err(ScheduleError::InvalidBreak)
    ));

    let mut input = monday_input(&clinic.doctor_id);
    input.doctor_id = "nope".to_string();
    assert!(matches!(
        schedule::create_slot(pool, &input).await,
        Err(ScheduleError::DoctorNotFound)
    ));
}

#[tokio::test]
async fn deactivated_slots_stop_offering_marks() {
    let clinic = clinic().await;
    let pool = &clinic.pool;

    let mut input = monday_input(&clinic.doctor_id);
    input.weekday = Weekday::from(tomorrow().weekday());
    input.starts_at = at(9, 0);
    input.ends_at = at(11, 0);
    input.break_starts_at = None;
    input.break_ends_at = None;
    let slot_id = schedule::create_slot(pool, &input).await.unwrap();

    let marks = booking::available_slots(pool, &clinic.doctor_id, tomorrow()).await.unwrap();
    assert_eq!(marks, vec![at(9, 0), at(9, 30), at(10, 0), at(10, 30)]);

    schedule::set_slot_active(pool, &slot_id, false).await.unwrap();
    assert!(schedule::doctor_slots(pool, &clinic.doctor_id).await.unwrap().is_empty());

    // With no active window the default grid applies again.
    let marks = booking::available_slots(pool, &clinic.doctor_id, tomorrow()).await.unwrap();
    assert_eq!(marks.first(), Some(&at(9, 0)));
    assert_eq!(marks.last(), Some(&at(16, 30)));

    schedule::set_slot_active(pool, &slot_id, true).await.unwrap();
    let marks = booking::available_slots(pool, &clinic.doctor_id, tomorrow()).await.unwrap();
    assert_eq!(marks.last(), Some(&at(10, 30)));
}

#[tokio::test]
async fn split_shifts_merge_into_one_grid() {
    let clinic = clinic().await;
    let pool = &clinic.pool;

    let weekday = Weekday::from(tomorrow().weekday());
    let mut morning = monday_input(&clinic.doctor_id);
    morning.weekday = weekday;
    morning.starts_at = at(9, 0);
    morning.ends_at = at(10, 0);
    morning.break_starts_at = None;
    morning.break_ends_at = None;
    schedule::create_slot(pool, &morning).await.unwrap();

    let mut evening = morning.clone();
    evening.starts_at = at(16, 0);
    evening.ends_at = at(17, 0);
    schedule::create_slot(pool, &evening).await.unwrap();

    let marks = booking::available_slots(pool, &clinic.doctor_id, tomorrow()).await.unwrap();
    assert_eq!(marks, vec![at(9, 0), at(9, 30), at(16, 0), at(16, 30)]);
}
