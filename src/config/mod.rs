//! # Configuration
//!
//! Typed configuration injected into the controller and its transport.

mod controller;

pub use controller::ControllerConfig;
