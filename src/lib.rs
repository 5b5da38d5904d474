#![forbid(unsafe_code)]

//! Shift-aware support chat queue.
//!
//! Sessions are admitted into a primary or overflow queue, handed to
//! agents junior-first on a periodic tick, and evicted once polled up to
//! the inactivity threshold.

pub mod config;
pub mod engine;
pub mod errors;
pub mod http;
pub mod logging;
pub mod models;

pub use config::GlobalConfig;
pub use engine::QueueEngine;
pub use errors::{AppError, Result};
