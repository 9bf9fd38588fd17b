pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod local_state;
pub mod logging;
pub mod ui;
