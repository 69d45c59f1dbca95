// Service module exports

pub mod auth;
pub mod availability;
pub mod category;
pub mod config;
pub mod database;
pub mod grid;
pub mod selection;
pub mod settings;
pub mod time_axis;
