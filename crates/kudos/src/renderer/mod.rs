pub mod instance;

pub use instance::{DisplayBuffer, DisplayInstance, LabelRecord};
