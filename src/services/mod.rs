use crate::error::AppError;

pub type ServiceResult<T> = Result<T, AppError>;

pub mod crud_service;

pub use crud_service::CrudService;
