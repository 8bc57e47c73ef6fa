//! Core domain + application logic for the doorman group-moderation bot.
//!
//! This crate is intentionally framework-agnostic. The Telegram Bot API lives
//! behind a port (trait) implemented in the adapter crate.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod moderation;

pub use errors::{Error, Result};
