//! Request handlers.
//!
//! Handlers only unwrap extractors, call the service and wrap the result;
//! errors are mapped to responses by [`AppError`](crate::error::AppError).

pub mod project;
