//! # Service Container
//!
//! Configuration and the wired service graph.

pub mod config;
pub mod services;

pub use config::{RuntimeConfig, RuntimeConfigError, CONFIG_PATH_ENV};
pub use services::{ConcreteHashRegistry, ServiceContainer};
