//! Adapter for the host's key-value option store
//!
//! The engine keeps its whole configuration under a single option key. The
//! store treats the value as an opaque JSON document.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait OptionStore: Debug + Send + Sync {
	/// Reads an option. Returns `None` if the option was never written.
	async fn read_option(&self, key: &str) -> FpResult<Option<serde_json::Value>>;

	/// Writes an option, replacing any previous value
	async fn update_option(&self, key: &str, value: serde_json::Value) -> FpResult<()>;
}

// vim: ts=4
