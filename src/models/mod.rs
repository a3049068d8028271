// Module exports for models

pub mod date_range;
pub mod display_mode;
pub mod grid;
pub mod item;
pub mod settings;
