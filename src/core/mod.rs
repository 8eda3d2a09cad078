//! Core functionality for host sampling, rendering and dispatch.

pub mod config;
pub mod dispatcher;
pub mod monitor;
pub mod notify;
pub mod schedule;

pub use config::Config;
pub use dispatcher::Dispatcher;
