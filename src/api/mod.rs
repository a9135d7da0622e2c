pub mod api;
pub(crate) mod dtos;
pub(crate) mod errors;
mod health_handler;
mod todos_handler;
pub(crate) mod validation;
