// Service module exports

pub mod drag;
pub mod layout;
pub mod range;
pub mod selection;
pub mod settings;
pub mod transform;
