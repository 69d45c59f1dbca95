// Module exports for models

pub mod category;
pub mod gesture;
pub mod settings;
pub mod slot;
pub mod slot_key;
