use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::Config;

pub async fn healthcheck(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "environment": config.app_env,
    }))
}

pub async fn hello() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello, World!")
}
