use std::{env, fs, path::Path, str::FromStr};

use chrono::{Days, NaiveTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::auth::{hash_password, new_id};
use crate::models::{Role, Weekday};
use crate::store::{appointments, doctors, schedules, users};

pub async fn connect(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let path = if let Some(path) = db_url.strip_prefix("sqlite://") {
        Some(path)
    } else if let Some(path) = db_url.strip_prefix("sqlite:") {
        Some(path)
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    let db_path = Path::new(path);
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Synthetic development dataset, inserted once into an empty store: four
/// specializations, one admin / doctor / patient, the doctor's profile and
/// Monday schedule, the patient's medical record and one booked visit.
pub async fn seed_demo(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let therapist_id = doctors::insert_specialization(
        pool,
        "General practitioner",
        "Primary care physician",
        "General medicine",
    )
    .await?;
    doctors::insert_specialization(
        pool,
        "Surgeon",
        "Operations and surgical interventions",
        "Surgery",
    )
    .await?;
    doctors::insert_specialization(pool, "Cardiologist", "Treatment of heart conditions", "Cardiology")
        .await?;
    doctors::insert_specialization(pool, "Neurologist", "Treatment of the nervous system", "Neurology")
        .await?;

    let admin_email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@clinic.local".to_string());
    let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    if admin_password == "admin123" {
        log::warn!("ADMIN_PASSWORD not set. Using default password 'admin123'. Set ADMIN_PASSWORD in production.");
    }

    let admin = users::NewUser {
        id: new_id(),
        email: admin_email,
        password_hash: hash_or_protocol_err(&admin_password)?,
        role: Role::Admin,
        first_name: "Clinic".to_string(),
        last_name: "Admin".to_string(),
        phone: "+1 (000) 000-0000".to_string(),
        birth_date: None,
    };
    users::insert(pool, &admin).await?;

    let doctor_user = users::NewUser {
        id: new_id(),
        email: "doctor@clinic.local".to_string(),
        password_hash: hash_or_protocol_err("doctor1")?,
        role: Role::Doctor,
        first_name: "Dana".to_string(),
        last_name: "Meyer".to_string(),
        phone: "+1 (111) 111-1111".to_string(),
        birth_date: None,
    };
    users::insert(pool, &doctor_user).await?;

    let patient_user = users::NewUser {
        id: new_id(),
        email: "patient@clinic.local".to_string(),
        password_hash: hash_or_protocol_err("patient1")?,
        role: Role::Patient,
        first_name: "Paul".to_string(),
        last_name: "Mason".to_string(),
        phone: "+1 (222) 222-2222".to_string(),
        birth_date: None,
    };
    users::insert(pool, &patient_user).await?;

    let doctor = doctors::NewDoctor {
        id: new_id(),
        user_id: doctor_user.id.clone(),
        specialization_id: therapist_id,
        license: "L-12345".to_string(),
        insurance: "standard plan".to_string(),
        program: "standard".to_string(),
        rating: 4.8,
    };
    doctors::insert(pool, &doctor).await?;

    users::insert_medical_record(pool, &patient_user.id, "0(I) Rh+", "none", "none").await?;

    schedules::insert(
        pool,
        &schedules::NewScheduleSlot {
            id: new_id(),
            doctor_id: doctor.id.clone(),
            weekday: Weekday::Monday,
            starts_at: at(9, 0),
            ends_at: at(18, 0),
            break_starts_at: Some(at(13, 0)),
            break_ends_at: Some(at(14, 0)),
        },
    )
    .await?;

    let today = Utc::now().date_naive();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    appointments::insert(
        pool,
        &appointments::NewAppointment {
            id: new_id(),
            patient_id: patient_user.id.clone(),
            doctor_id: doctor.id.clone(),
            visit_date: tomorrow,
            visit_time: at(10, 0),
            symptoms: "fever and cough".to_string(),
        },
    )
    .await?;

    log::info!("seeded demo data: 4 specializations, 3 users, 1 doctor, 1 appointment");
    Ok(())
}

fn hash_or_protocol_err(password: &str) -> Result<String, sqlx::Error> {
    hash_password(password).map_err(|_| sqlx::Error::Protocol("password hash failed".into()))
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}
