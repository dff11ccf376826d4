use crate::services::CrudService;

use super::model::Equipment;

pub type EquipmentService = CrudService<Equipment>;
