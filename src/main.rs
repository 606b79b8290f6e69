use std::env;

use clinicdesk::db;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let db_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./data/clinicdesk.db".to_string());
    db::ensure_sqlite_dir(&db_url)?;

    let pool = db::connect(&db_url).await?;
    db::run_migrations(&pool).await?;

    let seed = env::var("SEED_DEMO").map(|value| value != "false").unwrap_or(true);
    if seed {
        db::seed_demo(&pool).await?;
    }

    let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    let doctors = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM doctors")
        .fetch_one(&pool)
        .await?;
    let appointments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
        .fetch_one(&pool)
        .await?;
    log::info!(
        "clinicdesk store ready at {db_url}: {users} users, {doctors} doctors, {appointments} appointments"
    );

    Ok(())
}
