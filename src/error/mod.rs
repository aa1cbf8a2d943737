mod app_error;

pub use app_error::{AppError, FieldError};

pub type Result<T> = std::result::Result<T, AppError>;
