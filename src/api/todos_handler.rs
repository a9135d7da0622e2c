use actix_web::{web, HttpResponse};

use super::dtos::todo::CreateOrUpdateTodoDTO;
use super::errors::TodoApiError;
use super::validation::RequestValidator;
use crate::models::pagination::PaginationRequest;
use crate::service::TodoService;

/// Runs a blocking service call on the blocking thread pool
async fn run<F, R>(call: F) -> Result<R, TodoApiError>
where
    F: FnOnce() -> Result<R, TodoApiError> + Send + 'static,
    R: Send + 'static,
{
    web::block(call).await?
}

/// Ids are non-negative integers that fit the `todos.id` column
fn parse_todo_id(raw: &str) -> Result<i32, TodoApiError> {
    raw.parse::<u32>()
        .ok()
        .and_then(|value| i32::try_from(value).ok())
        .ok_or_else(TodoApiError::invalid_id)
}

/// List active todos, paginated
pub async fn get_todos(
    query: web::Query<PaginationRequest>,
    validator: web::Data<RequestValidator>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let pagination = query.into_inner();
    validator.validate(&pagination)?;

    let page = run(move || service.find_all(pagination)).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// List soft-deleted todos, paginated
pub async fn get_deleted_todos(
    query: web::Query<PaginationRequest>,
    validator: web::Data<RequestValidator>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let pagination = query.into_inner();
    validator.validate(&pagination)?;

    let page = run(move || service.find_all_deleted(pagination)).await?;

    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_todo_by_id(
    todo_id: web::Path<String>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    let todo = run(move || service.find_by_id(todo_id)).await?;

    Ok(HttpResponse::Ok().json(todo))
}

/// Create a new todo
pub async fn create_todo(
    request_data: web::Json<CreateOrUpdateTodoDTO>,
    validator: web::Data<RequestValidator>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let request = request_data.into_inner();
    validator.validate(&request)?;

    let inserted = run(move || service.create(request)).await?;

    Ok(HttpResponse::Ok().json(inserted))
}

/// Overwrite title and description of a todo
pub async fn update_todo(
    todo_id: web::Path<String>,
    request_data: web::Json<CreateOrUpdateTodoDTO>,
    validator: web::Data<RequestValidator>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    let request = request_data.into_inner();
    validator.validate(&request)?;

    let updated = run(move || service.update(todo_id, request)).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Soft-delete a todo
pub async fn delete_todo(
    todo_id: web::Path<String>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    run(move || service.delete(todo_id)).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn mark_todo_as_complete(
    todo_id: web::Path<String>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    let todo = run(move || service.mark_as_completed(todo_id)).await?;

    Ok(HttpResponse::Ok().json(todo))
}

pub async fn mark_todo_as_incomplete(
    todo_id: web::Path<String>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    let todo = run(move || service.mark_as_uncompleted(todo_id)).await?;

    Ok(HttpResponse::Ok().json(todo))
}

/// Bring a soft-deleted todo back
pub async fn recover_todo(
    todo_id: web::Path<String>,
    service: web::Data<dyn TodoService>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    run(move || service.recover(todo_id)).await?;

    Ok(HttpResponse::NoContent().finish())
}
