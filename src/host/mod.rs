//! Driver side of the interface
//!
//! Core and session state the builders consume, the platform configuration,
//! and the transfer builders themselves.

mod builder;
mod config;
mod context;
mod session;

pub use builder::{
    image_version, session_command, session_property, sys_debug_config, sys_init, sys_pc_prep,
};
pub use config::{PlatformConfig, UbwcConfig};
pub use context::CoreContext;
pub use session::Session;
