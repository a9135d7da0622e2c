use crate::schema::*;
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable};
use serde::{Serialize, Serializer};

/// Soft-delete state of a todo. Stored as a nullable `deleted_at` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Deleted(DateTime<Utc>),
}

impl Lifecycle {
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted(at) => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Lifecycle {
    fn from(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Lifecycle::Deleted(at),
            None => Lifecycle::Active,
        }
    }
}

/// Completion state of a todo. Stored as a nullable `completed_at` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Incomplete,
    Completed(DateTime<Utc>),
}

impl Completion {
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Completion::Incomplete => None,
            Completion::Completed(at) => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Completion {
    fn from(completed_at: Option<DateTime<Utc>>) -> Self {
        match completed_at {
            Some(at) => Completion::Completed(at),
            None => Completion::Incomplete,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
    pub completion: Completion,
}

impl Todo {
    pub fn is_deleted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Deleted(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.completion, Completion::Completed(_))
    }
}

/// Wire shape of a todo, both state flags flattened back to nullable timestamps
#[derive(Serialize)]
struct TodoBody<'a> {
    id: i32,
    title: &'a str,
    description: Option<&'a str>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Serialize for Todo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TodoBody {
            id: self.id,
            title: &self.title,
            description: self.description.as_deref(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.lifecycle.deleted_at(),
            completed_at: self.completion.completed_at(),
        }
        .serialize(serializer)
    }
}

/// Row of the `todos` table, columns in schema order
#[derive(Debug, Clone, Queryable)]
pub struct TodoRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: row.deleted_at.into(),
            completion: row.completed_at.into(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "todos"]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    /// An empty description is stored as null
    pub fn from_details(title: String, description: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            title,
            description: description.filter(|d| !d.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields overwritten by an update. Identity and state flags are never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoChanges {
    pub title: String,
    pub description: Option<String>,
}

impl TodoChanges {
    pub fn from_details(title: String, description: Option<String>) -> Self {
        Self {
            title,
            description: description.filter(|d| !d.is_empty()),
        }
    }
}
