pub mod client;
pub mod components;
pub mod config;
pub mod error;
pub mod handlers;
pub mod service;
pub mod shutdown;
pub mod startup;
