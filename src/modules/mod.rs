//! Route modules shipped with the server. Each directory holds the module's routes
//! entry and `route.config.toml`; the loader mounts it when both line up with a
//! registration below.

use crate::loader::ModuleRegistry;

#[path = "category/category.routes.rs"]
pub mod category;
#[path = "equipment/equipment.routes.rs"]
pub mod equipment;
#[path = "product/product.routes.rs"]
pub mod product;

pub fn builtin_registry() -> ModuleRegistry {
    ModuleRegistry::new()
        .with(category::CategoryModule)
        .with(equipment::EquipmentModule)
        .with(product::ProductModule)
}
