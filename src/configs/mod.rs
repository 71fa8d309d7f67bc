use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{ENV, api::error};

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let database_url = &ENV.database_url;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), error::SystemError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| error::SystemError::InternalError(Box::new(e)))?;
    log::info!("Database migrations applied");
    Ok(())
}
