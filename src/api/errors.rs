use actix_web::{
    body::BoxBody,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpResponse, ResponseError,
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct GlobalErrorResponse {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum TodoApiError {
    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    UnprocessableEntity(String),

    #[display(fmt = "{}", _0)]
    InternalServerError(String),
}

impl std::error::Error for TodoApiError {}

impl TodoApiError {
    pub fn todo_not_found() -> Self {
        TodoApiError::NotFound(String::from("Todo not found"))
    }

    pub fn deleted_todo_not_found() -> Self {
        TodoApiError::NotFound(String::from("Deleted todo not found"))
    }

    pub fn invalid_id() -> Self {
        TodoApiError::BadRequest(String::from("Please provide a numeric id"))
    }

    pub fn unexpected() -> Self {
        TodoApiError::InternalServerError(String::from("An unexpected error occurred"))
    }
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            TodoApiError::BadRequest(_) => http::StatusCode::BAD_REQUEST,
            TodoApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            TodoApiError::UnprocessableEntity(_) => http::StatusCode::UNPROCESSABLE_ENTITY,
            TodoApiError::InternalServerError(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        let mut res = HttpResponse::new(status);

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let body = GlobalErrorResponse {
            status: status.as_u16(),
            message: self.to_string(),
        };

        match serde_json::to_string(&body) {
            Ok(json) => res.set_body(BoxBody::new(json)),
            Err(_) => res.set_body(BoxBody::new(r#"{"status":500,"message":"An unexpected error occurred"}"#)),
        }
    }
}

/// Reports the first failing rule, fields taken in name order so the
/// message is stable between runs
impl From<ValidationErrors> for TodoApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let message = fields
            .into_iter()
            .find_map(|(field, errs)| {
                errs.first().map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{} failed on the '{}' rule", field, err.code),
                })
            })
            .unwrap_or_else(|| String::from("Invalid request"));

        TodoApiError::BadRequest(message)
    }
}

impl From<actix_web::error::BlockingError> for TodoApiError {
    fn from(_: actix_web::error::BlockingError) -> Self {
        TodoApiError::unexpected()
    }
}
