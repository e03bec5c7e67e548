//! Landing page settings persisted through the filesystem option store

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use common::{REFERER, catalog, setup_test_logging};
use frontpage::{FrontPage, ShowOnFront};
use frontpage_option_store_fs::OptionStoreFs;
use frontpage_types::prelude::*;
use serde_json::json;
use tempfile::TempDir;

async fn create_front_page(dir: &TempDir) -> FrontPage {
	setup_test_logging();
	let store = OptionStoreFs::new(dir.path().into()).await.expect("Failed to create store");
	FrontPage::with_defaults(Arc::new(store), catalog()).expect("Failed to build front page service")
}

#[tokio::test]
async fn test_saved_overrides_survive_restart() {
	let temp = TempDir::new().expect("Failed to create temp directory");

	let fp = create_front_page(&temp).await;
	let input: SettingsBlob =
		serde_json::from_value(json!({ "logged_out_front_page": "99" })).expect("Failed to build input");
	fp.save(input, Some(REFERER)).await.expect("Failed to save settings");
	drop(fp);

	let fp = create_front_page(&temp).await;
	assert_eq!(fp.show_on_front(ShowOnFront::Posts, &false).await.ok(), Some(ShowOnFront::Page));
	assert_eq!(fp.page_on_front(3, &false).await.ok(), Some(99));
	assert_eq!(fp.show_on_front(ShowOnFront::Posts, &true).await.ok(), Some(ShowOnFront::Posts));

	let stored = std::fs::read_to_string(temp.path().join("front_page_settings.json")).expect("Failed to read file");
	let stored: serde_json::Value = serde_json::from_str(&stored).expect("Failed to parse file");
	assert_eq!(stored, json!({ "logged_out_front_page": 99 }));
}

// vim: ts=4
