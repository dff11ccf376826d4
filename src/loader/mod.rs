//! Filesystem-driven module loading: discover directories, resolve their route
//! config, and mount the registered routers behind per-module middleware.

pub mod descriptor;
pub mod middleware;
pub mod mounter;
pub mod planner;
pub mod rate_limit;
pub mod registry;
pub mod reporter;
pub mod route_config;

pub use mounter::{mount_modules, ModuleStatus, MountReport};
pub use planner::RESERVED_PATHS;
pub use registry::{ModuleContext, ModuleRegistry, RouteModule};
