pub mod celebration;
pub mod fill;
pub mod layout;
pub mod popup;
pub mod praise;
pub mod rating;
pub mod registry;
pub mod render;
pub mod rng;
