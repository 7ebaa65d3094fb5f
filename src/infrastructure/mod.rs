pub mod database;
pub mod identity;
pub mod media;
pub mod repositories;
pub mod time;
pub mod util;
