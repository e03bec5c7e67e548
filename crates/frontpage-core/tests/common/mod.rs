//! Common test utilities for the core engine tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use frontpage_core::{FieldSpec, FieldType, Schema, Tab};
use frontpage_types::option_store::OptionStore;
use frontpage_types::prelude::*;

/// In-memory option store recording every write
#[derive(Debug, Default)]
pub struct MemoryStore {
	options: Mutex<HashMap<String, serde_json::Value>>,
	writes: Mutex<usize>,
}

impl MemoryStore {
	pub fn with_option(key: &str, value: serde_json::Value) -> Self {
		let store = Self::default();
		store.options.lock().insert(key.to_string(), value);
		store
	}

	pub fn option(&self, key: &str) -> Option<serde_json::Value> {
		self.options.lock().get(key).cloned()
	}

	pub fn writes(&self) -> usize {
		*self.writes.lock()
	}
}

#[async_trait]
impl OptionStore for MemoryStore {
	async fn read_option(&self, key: &str) -> FpResult<Option<serde_json::Value>> {
		Ok(self.options.lock().get(key).cloned())
	}

	async fn update_option(&self, key: &str, value: serde_json::Value) -> FpResult<()> {
		self.options.lock().insert(key.to_string(), value);
		*self.writes.lock() += 1;
		Ok(())
	}
}

/// Two-tab schema: `general` declares `b` and `c`; `display` declares `a`, `theme` and `accent`
pub fn test_schema() -> Schema {
	let field = |id: &str, field_type: FieldType| {
		FieldSpec::builder(id).name(id).field_type(field_type).build().expect("Failed to build field")
	};
	Schema::new()
		.with_tab(
			Tab::new("general", "General")
				.with_field(field("b", FieldType::Number))
				.with_field(field("c", FieldType::Text)),
		)
		.expect("Failed to add tab")
		.with_tab(
			Tab::new("display", "Display")
				.with_field(field("a", FieldType::Number))
				.with_field(field("theme", FieldType::Select))
				.with_field(field("accent", FieldType::Color)),
		)
		.expect("Failed to add tab")
}

pub fn blob(value: serde_json::Value) -> SettingsBlob {
	serde_json::from_value(value).expect("Failed to build blob")
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::DEBUG).try_init();
}

// vim: ts=4
