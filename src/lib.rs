//! Satkey - saturation key for PNG images
//!
//! Command-line host for the `saturation-key` engine.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
