//! Shared types, adapter traits, and error types for the frontpage settings engine.
//!
//! This crate holds what the engine crates and the adapter implementations
//! have in common: the settings value model, the collaborator traits the
//! host implements, and the error type they all report through.

#![forbid(unsafe_code)]

pub mod auth;
pub mod content_catalog;
pub mod error;
pub mod option_store;
pub mod prelude;
pub mod value;

pub use value::{DEFAULT_SENTINEL, OptionValue, SettingsBlob};

// vim: ts=4
