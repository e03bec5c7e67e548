//! Common test utilities: in-memory collaborators and logging setup

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use frontpage::FrontPage;
use frontpage_types::content_catalog::{ContentCatalog, PageRef};
use frontpage_types::option_store::OptionStore;
use frontpage_types::prelude::*;

pub const OPTION_KEY: &str = "front_page_settings";
pub const REFERER: &str = "/wp-admin/options.php?page=front-page-settings&tab=login-status-pages";

#[derive(Debug, Default)]
pub struct MemoryStore {
	options: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
	pub fn with_settings(value: serde_json::Value) -> Self {
		let store = Self::default();
		store.options.write().insert(OPTION_KEY.into(), value);
		store
	}

	pub fn settings(&self) -> Option<serde_json::Value> {
		self.options.read().get(OPTION_KEY).cloned()
	}
}

#[async_trait]
impl OptionStore for MemoryStore {
	async fn read_option(&self, key: &str) -> FpResult<Option<serde_json::Value>> {
		Ok(self.options.read().get(key).cloned())
	}

	async fn update_option(&self, key: &str, value: serde_json::Value) -> FpResult<()> {
		self.options.write().insert(key.into(), value);
		Ok(())
	}
}

#[derive(Debug)]
pub struct StaticCatalog(pub Vec<PageRef>);

#[async_trait]
impl ContentCatalog for StaticCatalog {
	async fn list_pages(&self) -> FpResult<Vec<PageRef>> {
		Ok(self.0.clone())
	}
}

pub fn catalog() -> Arc<StaticCatalog> {
	Arc::new(StaticCatalog(vec![
		PageRef { id: 7, title: "Members".into() },
		PageRef { id: 42, title: "Dashboard".into() },
		PageRef { id: 99, title: "Welcome".into() },
	]))
}

pub fn front_page(store: Arc<MemoryStore>) -> FrontPage {
	setup_test_logging();
	FrontPage::with_defaults(store, catalog()).expect("Failed to build front page service")
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::DEBUG).try_init();
}

// vim: ts=4
