mod app;
mod toast;
pub mod views;

pub use app::AvailabilityApp;
