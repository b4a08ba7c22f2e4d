// src/application/slug/mod.rs
mod hook;
mod plugin;

pub use hook::SlugAssignmentHook;
pub use plugin::SlugPlugin;
