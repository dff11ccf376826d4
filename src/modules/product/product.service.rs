use crate::services::CrudService;

use super::model::Product;

pub type ProductService = CrudService<Product>;
