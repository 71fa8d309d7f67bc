pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const UPLOAD_PREFIX: &str = "uploads";
/// Upper bound for a text form field such as `author_name`
pub const MAX_TEXT_FIELD_SIZE: usize = 1024;

pub struct Env {
    pub database_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_region: String,
    pub aws_s3_bucket_name: String,
    pub s3_endpoint_url: Option<String>,
    pub s3_max_retries: usize,
    pub file_url_expiration: u64,
    pub max_upload_size: usize,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let aws_access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
            .expect("AWS_ACCESS_KEY_ID must be set in .env file or environment variable");
        let aws_secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
            .expect("AWS_SECRET_ACCESS_KEY must be set in .env file or environment variable");
        let aws_region = std::env::var("AWS_REGION")
            .expect("AWS_REGION must be set in .env file or environment variable");
        let aws_s3_bucket_name = std::env::var("AWS_S3_BUCKET_NAME")
            .expect("AWS_S3_BUCKET_NAME must be set in .env file or environment variable");
        let s3_endpoint_url = std::env::var("S3_ENDPOINT_URL").ok().filter(|s| !s.is_empty());

        let s3_max_retries = std::env::var("S3_MAX_RETRIES")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<usize>()
            .expect("S3_MAX_RETRIES must be a valid usize integer");

        let file_url_expiration = std::env::var("FILE_URL_EXPIRATION")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .expect("FILE_URL_EXPIRATION must be a valid u64 integer");
        let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| (50 * 1024 * 1024).to_string())
            .parse::<usize>()
            .expect("MAX_UPLOAD_SIZE must be a valid usize integer");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env {
            database_url,
            aws_access_key_id,
            aws_secret_access_key,
            aws_region,
            aws_s3_bucket_name,
            s3_endpoint_url,
            s3_max_retries,
            file_url_expiration,
            max_upload_size,
            frontend_url,
            ip,
            port,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
