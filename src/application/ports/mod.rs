// src/application/ports/mod.rs
pub mod identity;
pub mod media;
pub mod time;
pub mod util;
