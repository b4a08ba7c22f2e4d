// src/application/ports/mod.rs
pub mod hooks;
pub mod time;
pub mod util;
