use std::sync::Arc;

use actix_web::{self, middleware::Logger, web, App, HttpRequest, HttpServer};
use log::info;

use super::{errors::TodoApiError, health_handler, todos_handler, validation::RequestValidator};
use crate::config::Config;
use crate::service::TodoService;

/// Extractor settings and every route of the API
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        TodoApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        TodoApiError::BadRequest(err.to_string()).into()
    }))
    .route("/healthcheck", web::get().to(health_handler::healthcheck))
    .service(
        web::scope("/api/v1")
            .route("/hello", web::get().to(health_handler::hello))
            .service(
                web::scope("/todos")
                    .route("", web::get().to(todos_handler::get_todos))
                    .route("", web::post().to(todos_handler::create_todo))
                    // before "/{id}" so it is not read as an id
                    .route("/deleted", web::get().to(todos_handler::get_deleted_todos))
                    .route("/{id}", web::get().to(todos_handler::get_todo_by_id))
                    .route("/{id}", web::put().to(todos_handler::update_todo))
                    .route("/{id}", web::delete().to(todos_handler::delete_todo))
                    .route(
                        "/{id}/complete",
                        web::patch().to(todos_handler::mark_todo_as_complete),
                    )
                    .route(
                        "/{id}/uncomplete",
                        web::patch().to(todos_handler::mark_todo_as_incomplete),
                    )
                    .route(
                        "/{id}/recover",
                        web::patch().to(todos_handler::recover_todo),
                    ),
            ),
    );
}

/// Fallback for unmatched routes
pub async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, TodoApiError> {
    Err(TodoApiError::NotFound(format!(
        "Cannot {} {}",
        req.method(),
        req.path()
    )))
}

pub async fn start_server(config: Config, service: Arc<dyn TodoService>) -> std::io::Result<()> {
    info!(
        "The {} is running in {} mode",
        config.app_name, config.app_env
    );

    let service = web::Data::from(service);
    let validator = web::Data::new(RequestValidator::new());
    let app_config = web::Data::new(config.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(validator.clone())
            .app_data(app_config.clone())
            .configure(configure)
            .default_service(web::route().to(not_found))
            .wrap(Logger::default())
    });

    let server = match config.workers {
        Some(workers) => server.workers(workers),
        None => server,
    };

    let result = server.bind(config.bind_address())?.run().await;

    info!("{} stopped", config.app_name);

    result
}
