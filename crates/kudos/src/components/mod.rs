pub mod canvas;
pub mod display;
