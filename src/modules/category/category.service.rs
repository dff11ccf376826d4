use crate::services::CrudService;

use super::model::Category;

pub type CategoryService = CrudService<Category>;
