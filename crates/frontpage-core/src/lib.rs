//! Core infrastructure of the frontpage settings engine.
//!
//! Schema registry, field renderers, the save-time sanitization pipeline, and
//! the hook registry they are extended through. The [`Engine`] bundles the
//! frozen pieces; it holds no settings state of its own.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod admin;
pub mod config;
pub mod hooks;
pub mod prelude;
pub mod render;
pub mod sanitize;
pub mod schema;
pub mod settings;

use frontpage_types::content_catalog::PageRef;

pub use config::EngineConfig;
pub use hooks::{HookRegistry, Hooks, RequestParams};
pub use render::{Control, RenderContext, RendererRegistry, RendererTable};
pub use sanitize::{Notice, NoticeKind, SanitizeOutcome, Sanitizer};
pub use schema::{FieldSpec, FieldType, Schema, SchemaRegistry, Tab, TabInfo};
pub use settings::{SettingsContext, SettingsService};

use crate::admin::SettingsPage;
use crate::prelude::*;

/// Frozen engine: configuration, hooks, base schema, and renderers
#[derive(Debug)]
pub struct Engine {
	config: EngineConfig,
	hooks: Hooks,
	schema: SchemaRegistry,
	renderers: RendererTable,
}

impl Engine {
	pub fn builder(base: Schema) -> EngineBuilder {
		EngineBuilder::new(base)
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn hooks(&self) -> &Hooks {
		&self.hooks
	}

	pub fn schema_registry(&self) -> &SchemaRegistry {
		&self.schema
	}

	pub fn renderers(&self) -> &RendererTable {
		&self.renderers
	}

	/// Current tab list
	pub fn tabs(&self) -> Vec<TabInfo> {
		self.schema.tabs(&self.hooks)
	}

	/// Current effective schema
	pub fn schema(&self) -> Schema {
		self.schema.schema(&self.hooks)
	}

	fn render_context<'a>(&'a self, pages: &'a [PageRef]) -> RenderContext<'a> {
		RenderContext { option_key: &self.config.option_key, pages, hooks: &self.hooks }
	}

	pub fn render_field(&self, field: &FieldSpec, current: Option<&OptionValue>, pages: &[PageRef]) -> Control {
		self.renderers.render(field, current, &self.render_context(pages))
	}

	/// Run the sanitization pipeline against the current effective schema
	pub fn sanitize(&self, input: SettingsBlob, referer: Option<&str>, previous: SettingsBlob) -> SanitizeOutcome {
		let schema = self.schema();
		Sanitizer { schema: &schema, hooks: &self.hooks, config: &self.config }.sanitize(input, referer, previous)
	}

	/// Sanitize a submission and persist it through `service`
	pub async fn save(
		&self,
		service: &SettingsService,
		input: SettingsBlob,
		referer: Option<&str>,
	) -> FpResult<SanitizeOutcome> {
		let schema = self.schema();
		let sanitizer = Sanitizer { schema: &schema, hooks: &self.hooks, config: &self.config };
		service.save(&sanitizer, input, referer).await
	}

	pub fn get_option(&self, settings: &SettingsContext, key: &str, default: impl Into<OptionValue>) -> OptionValue {
		settings.get_option(&self.hooks, key, default)
	}

	pub fn settings_page(
		&self,
		requested_tab: Option<&str>,
		settings: &SettingsContext,
		pages: &[PageRef],
	) -> SettingsPage {
		let schema = self.schema();
		SettingsPage::build(
			requested_tab,
			&self.tabs(),
			&schema,
			settings,
			&self.renderers,
			&self.render_context(pages),
			&self.config,
		)
	}

	pub fn is_admin_page(&self, hook: &str) -> bool {
		admin::is_admin_page(&self.hooks, &self.config, hook)
	}

	pub fn should_load_admin_assets(&self, hook: &str) -> bool {
		admin::should_load_admin_assets(&self.hooks, &self.config, hook)
	}

	pub fn process_actions(&self, post: &RequestParams, get: &RequestParams) -> FpResult<usize> {
		admin::process_actions(&self.hooks, &self.config, post, get)
	}
}

/// Collects configuration, hooks, and renderers before freezing them into an [`Engine`]
pub struct EngineBuilder {
	base: Schema,
	config: EngineConfig,
	hooks: HookRegistry,
	renderers: RendererRegistry,
}

impl EngineBuilder {
	/// Builder with the built-in renderers and type sanitizers registered
	pub fn new(base: Schema) -> Self {
		let mut hooks = HookRegistry::new();
		sanitize::register_default_sanitizers(&mut hooks);
		Self { base, config: EngineConfig::default(), hooks, renderers: RendererRegistry::with_builtins() }
	}

	pub fn config(mut self, config: EngineConfig) -> Self {
		self.config = config;
		self
	}

	pub fn hooks_mut(&mut self) -> &mut HookRegistry {
		&mut self.hooks
	}

	/// Register hooks through a closure
	pub fn with_hooks(mut self, f: impl FnOnce(&mut HookRegistry)) -> Self {
		f(&mut self.hooks);
		self
	}

	pub fn renderers_mut(&mut self) -> &mut RendererRegistry {
		&mut self.renderers
	}

	pub fn build(self) -> FpResult<Engine> {
		let schema = SchemaRegistry::new(self.base)?;
		info!("Settings engine ready with {} tabs", schema.base().tabs().len());
		Ok(Engine {
			config: self.config,
			hooks: self.hooks.freeze(),
			schema,
			renderers: self.renderers.freeze(),
		})
	}
}

// vim: ts=4
