pub mod file_metadata {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod storage;
    pub mod storage_s3;
    pub mod service;
    pub mod handle;
    pub mod route;
}
