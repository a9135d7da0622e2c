use chrono::Utc;
use log::{debug, error};

use crate::api::dtos::todo::CreateOrUpdateTodoDTO;
use crate::api::errors::TodoApiError;
use crate::models::{
    pagination::{PaginationRequest, TodoPage},
    todo_model::{NewTodo, Todo, TodoChanges},
};
use crate::repository::{RepositoryError, TodoRepository};

/// Todo use cases exposed to the HTTP layer
pub trait TodoService: Send + Sync {
    fn find_all(&self, pagination: PaginationRequest) -> Result<TodoPage, TodoApiError>;
    fn find_all_deleted(&self, pagination: PaginationRequest) -> Result<TodoPage, TodoApiError>;
    fn find_by_id(&self, todo_id: i32) -> Result<Todo, TodoApiError>;
    fn create(&self, request: CreateOrUpdateTodoDTO) -> Result<Todo, TodoApiError>;
    fn update(&self, todo_id: i32, request: CreateOrUpdateTodoDTO) -> Result<Todo, TodoApiError>;
    fn delete(&self, todo_id: i32) -> Result<(), TodoApiError>;
    fn mark_as_completed(&self, todo_id: i32) -> Result<Todo, TodoApiError>;
    fn mark_as_uncompleted(&self, todo_id: i32) -> Result<Todo, TodoApiError>;
    fn recover(&self, todo_id: i32) -> Result<(), TodoApiError>;
}

/// Logs the storage cause and hides it behind a fixed message
fn storage_failure(
    operation: &str,
    error: RepositoryError,
    into: fn(String) -> TodoApiError,
    message: &str,
) -> TodoApiError {
    error!("{} failed: {}", operation, error);
    into(message.to_string())
}

pub struct TodoManager<R> {
    repository: R,
}

fn log_completion(todo: Todo) -> Todo {
    if todo.is_completed() {
        debug!("marked todo {} as completed", todo.id);
    } else {
        debug!("marked todo {} as incomplete", todo.id);
    }

    todo
}

impl<R: TodoRepository> TodoManager<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: TodoRepository> TodoService for TodoManager<R> {
    fn find_all(&self, pagination: PaginationRequest) -> Result<TodoPage, TodoApiError> {
        let (data, total) = self.repository.find_all(&pagination).map_err(|e| {
            storage_failure(
                "find_all",
                e,
                TodoApiError::InternalServerError,
                "Failed to fetch todos",
            )
        })?;

        Ok(TodoPage::new(&pagination, data, total))
    }

    fn find_all_deleted(&self, pagination: PaginationRequest) -> Result<TodoPage, TodoApiError> {
        let (data, total) = self.repository.find_all_deleted(&pagination).map_err(|e| {
            storage_failure(
                "find_all_deleted",
                e,
                TodoApiError::InternalServerError,
                "Failed to fetch deleted todos",
            )
        })?;

        Ok(TodoPage::new(&pagination, data, total))
    }

    fn find_by_id(&self, todo_id: i32) -> Result<Todo, TodoApiError> {
        self.repository
            .find_by_id(todo_id)
            .map_err(|e| {
                storage_failure(
                    "find_by_id",
                    e,
                    TodoApiError::InternalServerError,
                    "Failed to fetch todo",
                )
            })?
            .ok_or_else(TodoApiError::todo_not_found)
    }

    fn create(&self, request: CreateOrUpdateTodoDTO) -> Result<Todo, TodoApiError> {
        let new_todo = NewTodo::from_details(request.title, request.description);

        let todo = self.repository.create(new_todo).map_err(|e| {
            storage_failure(
                "create",
                e,
                TodoApiError::UnprocessableEntity,
                "Failed to create todo",
            )
        })?;

        debug!("created todo {}", todo.id);

        Ok(todo)
    }

    fn update(&self, todo_id: i32, request: CreateOrUpdateTodoDTO) -> Result<Todo, TodoApiError> {
        let changes = TodoChanges::from_details(request.title, request.description);

        self.repository
            .update(todo_id, changes)
            .map_err(|e| {
                storage_failure(
                    "update",
                    e,
                    TodoApiError::UnprocessableEntity,
                    "Failed to update todo",
                )
            })?
            .ok_or_else(TodoApiError::todo_not_found)
    }

    fn delete(&self, todo_id: i32) -> Result<(), TodoApiError> {
        let deleted = self
            .repository
            .set_deleted_at(todo_id, Some(Utc::now()))
            .map_err(|e| {
                storage_failure(
                    "delete",
                    e,
                    TodoApiError::UnprocessableEntity,
                    "Failed to delete todo",
                )
            })?;

        if deleted {
            debug!("soft-deleted todo {}", todo_id);
            Ok(())
        } else {
            Err(TodoApiError::todo_not_found())
        }
    }

    fn mark_as_completed(&self, todo_id: i32) -> Result<Todo, TodoApiError> {
        self.repository
            .set_completed_at(todo_id, Some(Utc::now()))
            .map_err(|e| {
                storage_failure(
                    "mark_as_completed",
                    e,
                    TodoApiError::UnprocessableEntity,
                    "Failed to mark todo as completed",
                )
            })?
            .map(log_completion)
            .ok_or_else(TodoApiError::todo_not_found)
    }

    fn mark_as_uncompleted(&self, todo_id: i32) -> Result<Todo, TodoApiError> {
        self.repository
            .set_completed_at(todo_id, None)
            .map_err(|e| {
                storage_failure(
                    "mark_as_uncompleted",
                    e,
                    TodoApiError::UnprocessableEntity,
                    "Failed to mark todo as uncompleted",
                )
            })?
            .map(log_completion)
            .ok_or_else(TodoApiError::todo_not_found)
    }

    fn recover(&self, todo_id: i32) -> Result<(), TodoApiError> {
        let recovered = self.repository.set_deleted_at(todo_id, None).map_err(|e| {
            storage_failure(
                "recover",
                e,
                TodoApiError::UnprocessableEntity,
                "Failed to recover todo",
            )
        })?;

        if recovered {
            debug!("recovered todo {}", todo_id);
            Ok(())
        } else {
            Err(TodoApiError::deleted_todo_not_found())
        }
    }
}
