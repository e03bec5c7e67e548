//! Engine tests: schema hooks, rendering, settings page, admin screens

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{blob, setup_test_logging, test_schema};
use frontpage_core::render::render_text;
use frontpage_core::{Control, Engine, EngineConfig, FieldSpec, FieldType, RequestParams, Schema, SettingsContext, TabInfo};
use frontpage_types::content_catalog::PageRef;
use frontpage_types::prelude::*;
use serde_json::json;

#[test]
fn test_schema_hooks_extend_tabs_and_fields() {
	setup_test_logging();
	let engine = Engine::builder(test_schema())
		.with_hooks(|hooks| {
			hooks
				.add_settings_tabs(|mut tabs| {
					tabs.push(TabInfo::new("help", "Help"));
					tabs
				})
				.add_tab_fields("display", |mut fields| {
					if let Ok(field) = FieldSpec::builder("font").field_type(FieldType::Text).build() {
						fields.push(field);
					}
					fields
				})
				.add_registered_settings(|mut schema| {
					if let Some(tab) = schema.tab_mut("general") {
						tab.fields.retain(|field| field.id != "c");
					}
					schema
				});
		})
		.build()
		.expect("Failed to build engine");

	let tab_ids: Vec<String> = engine.tabs().into_iter().map(|tab| tab.id).collect();
	assert_eq!(tab_ids, vec!["general", "display", "help"]);

	let schema = engine.schema();
	assert_eq!(schema.field_type("display", "font"), Some(&FieldType::Text));
	assert!(schema.field("general", "c").is_none());

	// The base definition is untouched
	assert!(engine.schema_registry().base().field("general", "c").is_some());
}

#[test]
fn test_keyed_json_schema() {
	let schema = Schema::from_json(json!([
		{
			"id": "general",
			"label": "General",
			"fields": {
				"title": { "name": "Title", "type": "text", "std": "Home" },
				"0": { "id": "landing", "name": "Landing", "type": "pages" }
			}
		}
	]))
	.expect("Failed to parse schema");

	assert_eq!(schema.field_type("general", "title"), Some(&FieldType::Text));
	assert_eq!(schema.field_type("general", "landing"), Some(&FieldType::Pages));
	assert_eq!(
		schema.field("general", "title").and_then(|field| field.params.std.clone()),
		Some(OptionValue::from("Home"))
	);
}

#[test]
fn test_unknown_type_renders_missing_diagnostic() {
	let engine = Engine::builder(test_schema()).build().expect("Failed to build engine");
	let field = FieldSpec::builder("sparkles").field_type(FieldType::parse("sparkle")).build().expect("Failed to build field");

	let control = engine.render_field(&field, Some(&OptionValue::from("x")), &[]);
	let Control::Missing { field_id, message, .. } = control else {
		panic!("expected missing control");
	};
	assert_eq!(field_id, "sparkles");
	assert!(message.contains("sparkles"));
}

#[test]
fn test_custom_renderer_is_dispatched() {
	let mut builder = Engine::builder(test_schema());
	builder.renderers_mut().register("sparkle", render_text).expect("Failed to register renderer");
	let engine = builder.build().expect("Failed to build engine");

	let field = FieldSpec::builder("sparkles").field_type(FieldType::parse("sparkle")).build().expect("Failed to build field");
	assert!(matches!(engine.render_field(&field, None, &[]), Control::TextInput { .. }));
}

#[test]
fn test_settings_page_for_requested_tab() {
	let engine = Engine::builder(test_schema()).build().expect("Failed to build engine");
	let settings = SettingsContext::new(blob(json!({ "a": 5 })));
	let pages = [PageRef { id: 3, title: "About".into() }];

	let page = engine.settings_page(Some("display"), &settings, &pages);
	assert_eq!(page.active_tab, "display");
	assert!(page.show_submit);
	assert_eq!(page.rows.iter().map(|row| row.id.as_str()).collect::<Vec<_>>(), vec!["a", "theme", "accent"]);
	assert!(page.tabs.iter().any(|tab| tab.active && tab.id == "display" && tab.query == "tab=display"));

	let Control::NumberInput { value, name, .. } = &page.rows[0].control else {
		panic!("expected number input");
	};
	assert_eq!(value, "5");
	assert_eq!(name, "front_page_settings[a]");
}

#[test]
fn test_settings_page_fallbacks() {
	let config = EngineConfig { default_tab: Some("display".into()), ..EngineConfig::default() };
	let engine = Engine::builder(test_schema()).config(config).build().expect("Failed to build engine");
	let settings = SettingsContext::default();

	let page = engine.settings_page(Some("unknown"), &settings, &[]);
	assert_eq!(page.active_tab, "display");

	let page = engine.settings_page(Some("help"), &settings, &[]);
	assert_eq!(page.active_tab, "display");
	assert!(!page.show_submit);
}

#[test]
fn test_admin_screens_and_actions() {
	let engine = Engine::builder(test_schema())
		.with_hooks(|hooks| {
			hooks.add_action("reset", |params| {
				if params.contains_key("confirm") { Ok(()) } else { Err(Error::ValidationError("unconfirmed".into())) }
			});
		})
		.build()
		.expect("Failed to build engine");

	assert!(engine.is_admin_page("settings_page_front-page-settings"));
	assert!(engine.should_load_admin_assets("settings_page_front-page-settings"));
	assert!(!engine.should_load_admin_assets("index.php"));

	let mut post = RequestParams::new();
	post.insert("front-page-action".into(), "reset".into());
	assert!(engine.process_actions(&post, &RequestParams::new()).is_err());

	post.insert("confirm".into(), "1".into());
	assert_eq!(engine.process_actions(&post, &RequestParams::new()).ok(), Some(1));
}

#[test]
fn test_duplicate_tabs_rejected() {
	let schema = test_schema();
	let tab = schema.tab("general").cloned().expect("Failed to find tab");
	assert!(schema.with_tab(tab).is_err());
}

// vim: ts=4
