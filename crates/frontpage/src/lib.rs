//! Login-state dependent landing page.
//!
//! Lets the host show a different landing page to logged-in and logged-out
//! visitors. [`FrontPage`] wires the settings engine, configured with the
//! base schema of this crate, to the host's option store and page catalog.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod front_page;
pub mod prelude;
pub mod settings;

use std::sync::Arc;

use frontpage_core::admin::SettingsPage;
use frontpage_core::{Engine, EngineBuilder, EngineConfig, SanitizeOutcome, SettingsContext, SettingsService};
use frontpage_types::auth::AuthState;
use frontpage_types::content_catalog::ContentCatalog;
use frontpage_types::option_store::OptionStore;

pub use front_page::{PageOverrides, ShowOnFront};

use crate::prelude::*;

/// Engine builder preloaded with the landing page schema
pub fn engine_builder(mut config: EngineConfig) -> FpResult<EngineBuilder> {
	config.default_tab.get_or_insert_with(|| settings::LOGIN_STATUS_PAGES_TAB.into());
	Ok(Engine::builder(settings::base_schema()?).config(config))
}

/// Landing page service of one host
#[derive(Debug)]
pub struct FrontPage {
	engine: Engine,
	service: SettingsService,
	catalog: Arc<dyn ContentCatalog>,
}

impl FrontPage {
	pub fn new(engine: Engine, store: Arc<dyn OptionStore>, catalog: Arc<dyn ContentCatalog>) -> Self {
		let service = SettingsService::new(store, engine.config().option_key.clone());
		Self { engine, service, catalog }
	}

	/// Service with the default configuration and no extra hooks
	pub fn with_defaults(store: Arc<dyn OptionStore>, catalog: Arc<dyn ContentCatalog>) -> FpResult<Self> {
		let engine = engine_builder(EngineConfig::default())?.build()?;
		Ok(Self::new(engine, store, catalog))
	}

	pub fn engine(&self) -> &Engine {
		&self.engine
	}

	pub fn service(&self) -> &SettingsService {
		&self.service
	}

	/// Load the settings for one request
	pub async fn settings(&self) -> FpResult<SettingsContext> {
		self.service.load(self.engine.hooks()).await
	}

	pub async fn overrides(&self) -> FpResult<PageOverrides> {
		let settings = self.settings().await?;
		Ok(PageOverrides::from_settings(&self.engine, &settings))
	}

	/// Resolve the host's landing mode for the current visitor
	pub async fn show_on_front(&self, requested: ShowOnFront, auth: &impl AuthState) -> FpResult<ShowOnFront> {
		let authenticated = auth.is_authenticated();
		let overrides = self.overrides().await?;
		let show = overrides.resolve_show_on_front(requested, &authenticated);
		debug!("Landing mode {} -> {} (authenticated: {})", requested, show, authenticated);
		Ok(show)
	}

	/// Resolve the host's landing page id for the current visitor
	pub async fn page_on_front(&self, requested: impl Into<OptionValue>, auth: &impl AuthState) -> FpResult<i64> {
		let requested = requested.into();
		let authenticated = auth.is_authenticated();
		let overrides = self.overrides().await?;
		let page = overrides.resolve_page_on_front(&requested, &authenticated);
		debug!("Landing page {} -> {} (authenticated: {})", requested, page, authenticated);
		Ok(page)
	}

	/// Settings page for the requested tab, with the page catalog listed
	pub async fn settings_page(&self, requested_tab: Option<&str>) -> FpResult<SettingsPage> {
		let settings = self.settings().await?;
		let pages = self.catalog.list_pages().await?;
		Ok(self.engine.settings_page(requested_tab, &settings, &pages))
	}

	/// Sanitize and persist a settings form submission
	pub async fn save(&self, input: SettingsBlob, referer: Option<&str>) -> FpResult<SanitizeOutcome> {
		self.engine.save(&self.service, input, referer).await
	}
}

// vim: ts=4
