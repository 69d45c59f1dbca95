// Settings service module
// Grid layout settings persisted in the settings table

mod mapper;
mod service;

pub use service::SettingsService;
