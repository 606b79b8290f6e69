#![allow(dead_code)]

use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use clinicdesk::auth::{self, AuthUser, Registration};
use clinicdesk::models::Role;
use clinicdesk::store::doctors;

/// Migrated in-memory database. A single connection so every handle sees the
/// same store.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("sqlite options");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

pub struct Clinic {
    pub pool: SqlitePool,
    pub patient: AuthUser,
    pub doctor_user: AuthUser,
    pub doctor_id: String,
    pub admin: AuthUser,
}

pub fn registration(email: &str, role: Role, first_name: &str, last_name: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        role,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        phone: String::new(),
        birth_date: None,
    }
}

fn actor(id: String, display_name: &str, role: Role) -> AuthUser {
    AuthUser {
        id,
        display_name: display_name.to_string(),
        role,
    }
}

/// One patient, one active cardiologist and one admin.
pub async fn clinic() -> Clinic {
    let pool = test_pool().await;

    let patient_id = auth::register(
        &pool,
        &registration("pat@example.com", Role::Patient, "Pat", "Moreau"),
    )
    .await
    .expect("register patient");
    let doctor_user_id = auth::register(
        &pool,
        &registration("doc@example.com", Role::Doctor, "Dana", "Meyer"),
    )
    .await
    .expect("register doctor user");
    let admin_id = auth::register(
        &pool,
        &registration("adm@example.com", Role::Admin, "Ada", "Minsk"),
    )
    .await
    .expect("register admin");

    let specialization_id =
        doctors::insert_specialization(&pool, "Cardiologist", "Treatment of heart conditions", "Cardiology")
            .await
            .expect("insert specialization");
    let doctor_id = auth::new_id();
    doctors::insert(
        &pool,
        &doctors::NewDoctor {
            id: doctor_id.clone(),
            user_id: doctor_user_id.clone(),
            specialization_id,
            license: "L-001".to_string(),
            insurance: String::new(),
            program: String::new(),
            rating: 0.0,
        },
    )
    .await
    .expect("insert doctor");

    Clinic {
        pool,
        patient: actor(patient_id, "Pat Moreau", Role::Patient),
        doctor_user: actor(doctor_user_id, "Dana Meyer", Role::Doctor),
        doctor_id,
        admin: actor(admin_id, "Ada Minsk", Role::Admin),
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn tomorrow() -> NaiveDate {
    today().checked_add_days(Days::new(1)).expect("tomorrow")
}

pub fn yesterday() -> NaiveDate {
    today().checked_sub_days(Days::new(1)).expect("yesterday")
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}
