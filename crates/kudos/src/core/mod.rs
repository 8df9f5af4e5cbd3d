pub mod arena;
pub mod time;
