pub mod action_library;
pub mod catalog;
pub mod company_profile;
pub mod customer;
pub mod export;
pub mod photo;
pub mod product;
pub mod report;
pub mod template;
pub mod user;
