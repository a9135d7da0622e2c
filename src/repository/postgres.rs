use chrono::{DateTime, Utc};
use diesel::{expression::BoxableExpression, pg::Pg, prelude::*, sql_types::Bool};

use super::{RepositoryResult, TodoRepository};
use crate::models::{
    pagination::PaginationRequest,
    todo_model::{NewTodo, Todo, TodoChanges, TodoRow},
    Pool,
};
use crate::schema::todos;

/// PostgreSQL backed repository, one pooled connection per call
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: Pool,
}

impl PgTodoRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

/// Which side of the soft delete a statement may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Active,
    Deleted,
}

impl Scope {
    /// Setting `deleted_at` targets active rows, clearing it targets deleted ones
    fn for_deleted_at(deleted: &Option<DateTime<Utc>>) -> Self {
        match deleted {
            Some(_) => Scope::Active,
            None => Scope::Deleted,
        }
    }
}

type RowFilter = Box<dyn BoxableExpression<todos::table, Pg, SqlType = Bool>>;

fn scope_filter(scope: Scope) -> RowFilter {
    match scope {
        Scope::Active => Box::new(todos::deleted_at.is_null()),
        Scope::Deleted => Box::new(todos::deleted_at.is_not_null()),
    }
}

fn scoped(scope: Scope) -> todos::BoxedQuery<'static, Pg> {
    todos::table.into_boxed().filter(scope_filter(scope))
}

fn page_query(scope: Scope, pagination: &PaginationRequest) -> todos::BoxedQuery<'static, Pg> {
    scoped(scope)
        .order(todos::id.asc())
        .offset(pagination.offset())
        .limit(pagination.limit())
}

fn row_query(todo_id: i32, scope: Scope) -> todos::BoxedQuery<'static, Pg> {
    scoped(scope).filter(todos::id.eq(todo_id))
}

/// Target of a conditional update: one id, only inside `scope`
fn row_target(todo_id: i32, scope: Scope) -> diesel::dsl::Filter<todos::table, RowFilter> {
    let filter: RowFilter = Box::new(todos::id.eq(todo_id).and(scope_filter(scope)));

    todos::table.filter(filter)
}

impl PgTodoRepository {
    fn page(
        &self,
        scope: Scope,
        pagination: &PaginationRequest,
    ) -> RepositoryResult<(Vec<Todo>, i64)> {
        let conn = &self.pool.get()?;

        let total: i64 = scoped(scope).count().get_result(conn)?;

        let rows = page_query(scope, pagination).load::<TodoRow>(conn)?;

        Ok((rows.into_iter().map(Todo::from).collect(), total))
    }

    fn find_in_scope(&self, todo_id: i32, scope: Scope) -> RepositoryResult<Option<Todo>> {
        let conn = &self.pool.get()?;

        let row = row_query(todo_id, scope)
            .first::<TodoRow>(conn)
            .optional()?;

        Ok(row.map(Todo::from))
    }
}

impl TodoRepository for PgTodoRepository {
    fn find_all(&self, pagination: &PaginationRequest) -> RepositoryResult<(Vec<Todo>, i64)> {
        self.page(Scope::Active, pagination)
    }

    fn find_all_deleted(
        &self,
        pagination: &PaginationRequest,
    ) -> RepositoryResult<(Vec<Todo>, i64)> {
        self.page(Scope::Deleted, pagination)
    }

    fn find_by_id(&self, todo_id: i32) -> RepositoryResult<Option<Todo>> {
        self.find_in_scope(todo_id, Scope::Active)
    }

    fn find_deleted_by_id(&self, todo_id: i32) -> RepositoryResult<Option<Todo>> {
        self.find_in_scope(todo_id, Scope::Deleted)
    }

    fn create(&self, new_todo: NewTodo) -> RepositoryResult<Todo> {
        let conn = &self.pool.get()?;

        let inserted = diesel::insert_into(todos::table)
            .values(&new_todo)
            .get_result::<TodoRow>(conn)?;

        Ok(inserted.into())
    }

    fn update(&self, todo_id: i32, changes: TodoChanges) -> RepositoryResult<Option<Todo>> {
        let conn = &self.pool.get()?;

        let row = diesel::update(row_target(todo_id, Scope::Active))
            .set((
                todos::title.eq(changes.title),
                todos::description.eq(changes.description),
                todos::updated_at.eq(Utc::now()),
            ))
            .get_result::<TodoRow>(conn)
            .optional()?;

        Ok(row.map(Todo::from))
    }

    fn set_deleted_at(
        &self,
        todo_id: i32,
        deleted: Option<DateTime<Utc>>,
    ) -> RepositoryResult<bool> {
        let conn = &self.pool.get()?;

        let scope = Scope::for_deleted_at(&deleted);

        let update_count = diesel::update(row_target(todo_id, scope))
            .set((todos::deleted_at.eq(deleted), todos::updated_at.eq(Utc::now())))
            .execute(conn)?;

        Ok(update_count > 0)
    }

    fn set_completed_at(
        &self,
        todo_id: i32,
        completed: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Option<Todo>> {
        let conn = &self.pool.get()?;

        let row = diesel::update(row_target(todo_id, Scope::Active))
            .set((todos::completed_at.eq(completed), todos::updated_at.eq(Utc::now())))
            .get_result::<TodoRow>(conn)
            .optional()?;

        Ok(row.map(Todo::from))
    }
}
