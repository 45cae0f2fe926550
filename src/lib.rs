pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod session;

pub use client::ApiClient;
pub use config::Config;
