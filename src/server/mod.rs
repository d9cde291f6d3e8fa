use actix_web::web;

pub mod docs;
pub mod end_point;
pub mod errors;
pub mod response;

use end_point::{
    convert_get_handler, convert_post_handler, docs_handler, health_handler, index_handler,
    metrics_handler,
};

/// Registers every route. Pair with `default_service(web::to(end_point::not_found_handler))`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index_handler)
        .service(convert_post_handler)
        .service(convert_get_handler)
        .service(health_handler)
        .service(docs_handler)
        .service(metrics_handler);
}
