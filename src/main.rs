use actix_cors::Cors;
use actix_web::{self, App, HttpServer, middleware::Logger, web};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::{
    configs::{connect_database, run_migrations},
    modules::file_metadata::{
        model::UploadConfig,
        repository_pg::FileMetadataRepositoryPg,
        service::FileMetadataService,
        storage_s3::{S3Settings, S3Storage},
    },
};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;
    run_migrations(&db_pool).await.map_err(|_| std::io::Error::other("Database migration error"))?;

    let storage = S3Storage::new(S3Settings::from_env(&ENV))
        .map_err(|e| std::io::Error::other(format!("Object storage error: {}", e)))?;
    let file_repo = FileMetadataRepositoryPg::new(db_pool);

    let file_service = FileMetadataService::with_dependencies(
        Arc::new(file_repo),
        Arc::new(storage),
        UploadConfig {
            max_file_size: ENV.max_upload_size,
            url_expiration: Duration::from_secs(ENV.file_url_expiration),
        },
    );

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(file_service.clone()))
            .service(health_check)
            .service(web::scope("/api").configure(modules::file_metadata::route::configure))
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
