pub mod memory;
pub mod postgres;

use chrono::{DateTime, Utc};
use derive_more::Display;
use diesel::result::Error as DBError;

use crate::models::{
    pagination::PaginationRequest,
    todo_model::{NewTodo, Todo, TodoChanges},
};

pub use memory::InMemoryTodoRepository;
pub use postgres::PgTodoRepository;

/// Storage failure. Callers don't inspect the cause beyond logging it.
#[derive(Debug, Display)]
pub enum RepositoryError {
    #[display(fmt = "Database connection error: {}", _0)]
    Connection(r2d2::Error),

    #[display(fmt = "Query error: {}", _0)]
    Query(DBError),
}

impl std::error::Error for RepositoryError {}

impl From<r2d2::Error> for RepositoryError {
    fn from(error: r2d2::Error) -> Self {
        RepositoryError::Connection(error)
    }
}

impl From<DBError> for RepositoryError {
    fn from(error: DBError) -> Self {
        RepositoryError::Query(error)
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Access to stored todos.
///
/// Queries are scoped: everything named without `deleted` sees only active
/// rows (`deleted_at IS NULL`), the `deleted` variants only soft-deleted ones.
/// Mutations are single conditional statements, a mutation that matched no
/// row in its scope reports `None`/`false` rather than an error.
#[cfg_attr(test, mockall::automock)]
pub trait TodoRepository: Send + Sync {
    /// Page of active todos ordered by id, with the total active count
    fn find_all(&self, pagination: &PaginationRequest) -> RepositoryResult<(Vec<Todo>, i64)>;

    /// Page of soft-deleted todos ordered by id, with the total deleted count
    fn find_all_deleted(
        &self,
        pagination: &PaginationRequest,
    ) -> RepositoryResult<(Vec<Todo>, i64)>;

    fn find_by_id(&self, todo_id: i32) -> RepositoryResult<Option<Todo>>;

    fn find_deleted_by_id(&self, todo_id: i32) -> RepositoryResult<Option<Todo>>;

    fn create(&self, new_todo: NewTodo) -> RepositoryResult<Todo>;

    /// Overwrites title and description of an active todo
    fn update(&self, todo_id: i32, changes: TodoChanges) -> RepositoryResult<Option<Todo>>;

    /// `Some` soft-deletes an active todo, `None` recovers a deleted one.
    /// Returns whether a row changed.
    fn set_deleted_at(
        &self,
        todo_id: i32,
        deleted: Option<DateTime<Utc>>,
    ) -> RepositoryResult<bool>;

    /// Stamps or clears `completed_at` on an active todo
    fn set_completed_at(
        &self,
        todo_id: i32,
        completed: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Option<Todo>>;
}
