//! Sanitization pipeline tests
//!
//! Merge, reset and idempotence behavior of saves against a two-tab schema

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{blob, setup_test_logging, test_schema};
use frontpage_core::{Engine, NoticeKind};
use frontpage_types::prelude::*;
use serde_json::json;

const GENERAL: &str = "/wp-admin/options.php?page=front-page-settings&tab=general";
const DISPLAY: &str = "/wp-admin/options.php?page=front-page-settings&tab=display";

fn engine() -> Engine {
	setup_test_logging();
	Engine::builder(test_schema()).build().expect("Failed to build engine")
}

#[test]
fn test_merge_keeps_keys_of_other_tabs() {
	let engine = engine();
	let outcome = engine.sanitize(blob(json!({ "b": "3" })), Some(GENERAL), blob(json!({ "a": 1, "b": 2 })));

	assert_eq!(outcome.blob, blob(json!({ "a": 1, "b": 3 })));
	assert!(!outcome.blob.contains_key("c"));
	let notice = outcome.notice.expect("Save should emit a notice");
	assert_eq!(notice.kind, NoticeKind::Updated);
	assert_eq!(notice.message, "Settings updated.");
}

#[test]
fn test_omitted_field_of_submitted_tab_is_reset() {
	let engine = engine();
	let outcome = engine.sanitize(blob(json!({ "b": 3 })), Some(DISPLAY), blob(json!({ "a": 1, "b": 2 })));

	// `a` is declared in `display` and was omitted
	assert_eq!(outcome.blob, blob(json!({ "b": 3 })));
}

#[test]
fn test_emptied_field_is_reset_not_stored() {
	let engine = engine();
	let outcome =
		engine.sanitize(blob(json!({ "b": "", "c": " kept " })), Some(GENERAL), blob(json!({ "b": 2, "c": "old" })));

	assert_eq!(outcome.blob, blob(json!({ "c": "kept" })));
}

#[test]
fn test_undeclared_keys_pass_through() {
	let engine = engine();
	let outcome = engine.sanitize(blob(json!({ "extra": " x " })), Some(GENERAL), SettingsBlob::new());

	assert_eq!(outcome.blob, blob(json!({ "extra": " x " })));
}

#[test]
fn test_missing_referer_returns_input_unsanitized() {
	let engine = engine();
	let input = blob(json!({ "b": "3", "c": " raw " }));
	let outcome = engine.sanitize(input.clone(), None, blob(json!({ "a": 1 })));

	assert_eq!(outcome.blob, input);
	assert!(outcome.notice.is_none());
}

#[test]
fn test_sanitize_is_idempotent_with_pure_hooks() {
	let engine = Engine::builder(test_schema())
		.with_hooks(|hooks| {
			hooks.add_sanitize_generic(|value, _| match value {
				OptionValue::String(s) => OptionValue::String(s.to_lowercase()),
				value => value,
			});
		})
		.build()
		.expect("Failed to build engine");

	let previous = blob(json!({ "a": 4, "theme": "dark" }));
	let input = blob(json!({ "b": " 12 ", "c": "  Hello World ", "other": "MiXeD" }));

	let once = engine.sanitize(input, Some(GENERAL), previous.clone()).blob;
	let twice = engine.sanitize(once.clone(), Some(GENERAL), once.clone()).blob;
	assert_eq!(once, twice);
	assert_eq!(once.get("b"), Some(&OptionValue::Int(12)));
	assert_eq!(once.get("c"), Some(&OptionValue::from("hello world")));
	assert_eq!(once.get("a"), previous.get("a"));
}

#[test]
fn test_tab_sanitizer_sees_raw_input() {
	let engine = Engine::builder(test_schema())
		.with_hooks(|hooks| {
			hooks.add_sanitize_tab("general", |mut input| {
				input.remove("c");
				input
			});
		})
		.build()
		.expect("Failed to build engine");

	let outcome = engine.sanitize(blob(json!({ "b": 1, "c": "gone" })), Some(GENERAL), blob(json!({ "c": "old" })));
	assert_eq!(outcome.blob, blob(json!({ "b": 1 })));
}

// vim: ts=4
