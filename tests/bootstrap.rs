mod common;

use clinicdesk::db;
use clinicdesk::models::DoctorStatus;
use clinicdesk::store::doctors;

use common::test_pool;

#[tokio::test]
async fn seeding_is_idempotent() {
    let pool = test_pool().await;

    db::seed_demo(&pool).await.unwrap();
    db::seed_demo(&pool).await.unwrap();

    let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    let specializations = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM specializations")
        .fetch_one(&pool)
        .await
        .unwrap();
    let appointments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 3);
    assert_eq!(specializations, 4);
    assert_eq!(appointments, 1);
}

#[tokio::test]
async fn seeded_directory_is_searchable() {
    let pool = test_pool().await;
    db::seed_demo(&pool).await.unwrap();

    let all = doctors::list_active(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].doctor_name, "Dana Meyer");
    assert_eq!(all[0].specialization, "General practitioner");
    assert_eq!(all[0].status, DoctorStatus::Active);

    let by_name = doctors::search(&pool, "meyer").await.unwrap();
    assert_eq!(by_name.len(), 1);

    let by_specialization = doctors::search(&pool, "primary care").await.unwrap();
    assert_eq!(by_specialization.len(), 1);

    let nothing = doctors::search(&pool, "dentist").await.unwrap();
    assert!(nothing.is_empty());

    doctors::set_status(&pool, &all[0].id, DoctorStatus::Inactive).await.unwrap();
    assert!(doctors::list_active(&pool).await.unwrap().is_empty());

    let specializations = doctors::list_specializations(&pool).await.unwrap();
    assert_eq!(specializations.len(), 4);
    assert_eq!(specializations[0].name, "Cardiologist");
}
