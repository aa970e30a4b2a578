pub mod api;
pub mod error;
pub mod filter;
pub mod forms;
pub mod models;
pub mod notify;
pub mod services;
pub mod session;
pub mod store;
