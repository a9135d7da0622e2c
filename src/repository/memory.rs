use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::{RepositoryResult, TodoRepository};
use crate::models::{
    pagination::PaginationRequest,
    todo_model::{Completion, Lifecycle, NewTodo, Todo, TodoChanges},
};

#[derive(Default)]
struct Store {
    last_id: i32,
    // Kept in insertion order, which is also id order
    rows: Vec<Todo>,
}

/// Repository that keeps todos in process memory.
///
/// Used with `--in-memory` and by the handler tests. Each operation holds the
/// lock for its whole duration, matching the per-statement atomicity of the
/// SQL backend. Every write is a single in-place assignment, so a store left
/// behind by a panicking holder is still consistent and stays in use.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    store: Mutex<Store>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn page_where<P>(
        &self,
        pagination: &PaginationRequest,
        in_scope: P,
    ) -> RepositoryResult<(Vec<Todo>, i64)>
    where
        P: Fn(&Todo) -> bool,
    {
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(0);

        let store = self.lock();

        let total = store.rows.iter().filter(|&t| in_scope(t)).count() as i64;
        let page = store
            .rows
            .iter()
            .filter(|&t| in_scope(t))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total))
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn find_all(&self, pagination: &PaginationRequest) -> RepositoryResult<(Vec<Todo>, i64)> {
        self.page_where(pagination, |t| !t.is_deleted())
    }

    fn find_all_deleted(
        &self,
        pagination: &PaginationRequest,
    ) -> RepositoryResult<(Vec<Todo>, i64)> {
        self.page_where(pagination, Todo::is_deleted)
    }

    fn find_by_id(&self, todo_id: i32) -> RepositoryResult<Option<Todo>> {
        let store = self.lock();

        Ok(store
            .rows
            .iter()
            .find(|t| t.id == todo_id && !t.is_deleted())
            .cloned())
    }

    fn find_deleted_by_id(&self, todo_id: i32) -> RepositoryResult<Option<Todo>> {
        let store = self.lock();

        Ok(store
            .rows
            .iter()
            .find(|t| t.id == todo_id && t.is_deleted())
            .cloned())
    }

    fn create(&self, new_todo: NewTodo) -> RepositoryResult<Todo> {
        let mut store = self.lock();

        store.last_id += 1;

        let todo = Todo {
            id: store.last_id,
            title: new_todo.title,
            description: new_todo.description,
            created_at: new_todo.created_at,
            updated_at: new_todo.updated_at,
            lifecycle: Lifecycle::Active,
            completion: Completion::Incomplete,
        };

        store.rows.push(todo.clone());

        Ok(todo)
    }

    fn update(&self, todo_id: i32, changes: TodoChanges) -> RepositoryResult<Option<Todo>> {
        let mut store = self.lock();

        Ok(store
            .rows
            .iter_mut()
            .find(|t| t.id == todo_id && !t.is_deleted())
            .map(|todo| {
                todo.title = changes.title;
                todo.description = changes.description;
                todo.updated_at = Utc::now();
                todo.clone()
            }))
    }

    fn set_deleted_at(
        &self,
        todo_id: i32,
        deleted: Option<DateTime<Utc>>,
    ) -> RepositoryResult<bool> {
        let mut store = self.lock();

        // Deleting targets active rows, recovering targets deleted ones
        let target = store
            .rows
            .iter_mut()
            .find(|t| t.id == todo_id && t.is_deleted() == deleted.is_none());

        match target {
            Some(todo) => {
                todo.lifecycle = deleted.into();
                todo.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_completed_at(
        &self,
        todo_id: i32,
        completed: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Option<Todo>> {
        let mut store = self.lock();

        Ok(store
            .rows
            .iter_mut()
            .find(|t| t.id == todo_id && !t.is_deleted())
            .map(|todo| {
                todo.completion = completed.into();
                todo.updated_at = Utc::now();
                todo.clone()
            }))
    }
}
