//! End-to-end landing page tests: save through the settings form, then resolve

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use common::{MemoryStore, REFERER, front_page};
use frontpage::ShowOnFront;
use frontpage_core::Control;
use frontpage_types::prelude::*;
use serde_json::json;

fn input(value: serde_json::Value) -> SettingsBlob {
	serde_json::from_value(value).expect("Failed to build input")
}

#[tokio::test]
async fn test_unconfigured_resolution_is_identity() {
	let store = Arc::new(MemoryStore::default());
	let fp = front_page(store.clone());

	for auth in [true, false] {
		assert_eq!(fp.show_on_front(ShowOnFront::Posts, &auth).await.ok(), Some(ShowOnFront::Posts));
		assert_eq!(fp.page_on_front("12", &auth).await.ok(), Some(12));
	}
	// First read provisions the empty blob
	assert_eq!(store.settings(), Some(json!({})));
}

#[tokio::test]
async fn test_save_from_login_status_tab_replaces_tab_values() {
	let store = Arc::new(MemoryStore::with_settings(json!({ "logged_out_front_page": "--default--" })));
	let fp = front_page(store.clone());

	let outcome = fp
		.save(input(json!({ "logged_in_front_page": "7" })), Some(REFERER))
		.await
		.expect("Failed to save settings");

	assert_eq!(outcome.blob, input(json!({ "logged_in_front_page": 7 })));
	assert_eq!(store.settings(), Some(json!({ "logged_in_front_page": 7 })));
	assert_eq!(outcome.notice.map(|n| n.code), Some("front-page-notices".to_string()));
}

#[tokio::test]
async fn test_logged_in_override() {
	let store = Arc::new(MemoryStore::default());
	let fp = front_page(store);
	fp.save(input(json!({ "logged_in_front_page": "42", "logged_out_front_page": "--default--" })), Some(REFERER))
		.await
		.expect("Failed to save settings");

	assert_eq!(fp.show_on_front(ShowOnFront::Posts, &true).await.ok(), Some(ShowOnFront::Page));
	assert_eq!(fp.page_on_front(5, &true).await.ok(), Some(42));

	assert_eq!(fp.show_on_front(ShowOnFront::Posts, &false).await.ok(), Some(ShowOnFront::Posts));
	assert_eq!(fp.page_on_front(5, &false).await.ok(), Some(5));
}

#[tokio::test]
async fn test_omitting_a_page_resets_it() {
	let store = Arc::new(MemoryStore::with_settings(json!({ "logged_in_front_page": 7, "logged_out_front_page": 99 })));
	let fp = front_page(store.clone());

	fp.save(input(json!({ "logged_out_front_page": "99" })), Some(REFERER)).await.expect("Failed to save settings");
	assert_eq!(store.settings(), Some(json!({ "logged_out_front_page": 99 })));

	assert_eq!(fp.page_on_front(1, &true).await.ok(), Some(1));
	assert_eq!(fp.page_on_front(1, &false).await.ok(), Some(99));
}

#[tokio::test]
async fn test_option_filter_overrides_stored_page() {
	let store = Arc::new(MemoryStore::with_settings(json!({ "logged_in_front_page": 7 })));
	let engine = frontpage::engine_builder(frontpage_core::EngineConfig::default())
		.expect("Failed to create engine builder")
		.with_hooks(|hooks| {
			hooks.add_get_option_key("logged_in_front_page", |_, _| OptionValue::Int(42));
		})
		.build()
		.expect("Failed to build engine");
	let fp = frontpage::FrontPage::new(engine, store, common::catalog());

	assert_eq!(fp.page_on_front(1, &true).await.ok(), Some(42));
}

#[tokio::test]
async fn test_settings_page_lists_catalog() {
	let store = Arc::new(MemoryStore::with_settings(json!({ "logged_in_front_page": 42 })));
	let fp = front_page(store);

	let page = fp.settings_page(Some("unknown")).await.expect("Failed to build settings page");
	assert_eq!(page.active_tab, "login-status-pages");
	assert!(page.show_submit);
	assert_eq!(page.rows.len(), 3);
	assert_eq!(page.rows[0].control, Control::Separator);

	let Control::Select { options, name, .. } = &page.rows[1].control else {
		panic!("expected page select");
	};
	assert_eq!(name, "front_page_settings[logged_in_front_page]");
	assert_eq!(options.len(), 4);
	assert_eq!(options[0].label, "--Default--");
	assert!(options.iter().any(|o| o.selected && o.value == "42"));

	let page = fp.settings_page(Some("help")).await.expect("Failed to build settings page");
	assert!(!page.show_submit);
}

// vim: ts=4
