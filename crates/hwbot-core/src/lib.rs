//! Core domain + application logic for the homework notification bot.
//!
//! This crate is intentionally transport-agnostic. The review API and Telegram
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod detector;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod poller;
pub mod ports;

pub use errors::{Error, Result};
