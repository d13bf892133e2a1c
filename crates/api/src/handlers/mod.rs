pub mod action_library;
pub mod auth;
pub mod catalog;
pub mod customers;
pub mod media;
pub mod products;
pub mod reports;
pub mod settings;
pub mod templates;
