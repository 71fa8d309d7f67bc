use actix_web::web::ServiceConfig;

use crate::modules::file_metadata::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(upload_file).service(get_metadata);
}
