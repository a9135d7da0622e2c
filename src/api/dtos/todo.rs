use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /todos` and `PUT /todos/{id}`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateOrUpdateTodoDTO {
    // Missing titles deserialize as empty so they fail validation, not parsing
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}
