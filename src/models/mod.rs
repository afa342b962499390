pub mod api;
pub mod catalog;
pub mod character;
pub mod document;
pub mod user;
