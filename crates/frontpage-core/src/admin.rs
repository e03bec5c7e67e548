//! Admin screens: settings page view model, screen detection, and actions

use serde::Serialize;

use crate::config::EngineConfig;
use crate::hooks::{Hooks, RequestParams};
use crate::prelude::*;
use crate::render::{Control, RenderContext, RendererTable};
use crate::schema::{Schema, TabInfo};
use crate::settings::SettingsContext;

/// Navigation entry of the settings page
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TabLink {
	pub id: String,
	pub label: String,
	/// Query string selecting the tab
	pub query: String,
	pub active: bool,
}

/// One rendered field of the active tab
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldRow {
	pub id: String,
	pub label: String,
	pub control: Control,
}

/// Structural description of the settings page
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SettingsPage {
	pub tabs: Vec<TabLink>,
	pub active_tab: String,
	pub rows: Vec<FieldRow>,
	pub show_submit: bool,
}

/// The requested tab if it is listed, else the configured default tab, else the first tab
pub fn active_tab(requested: Option<&str>, tabs: &[TabInfo], config: &EngineConfig) -> String {
	match requested {
		Some(tab) if tabs.iter().any(|info| info.id == tab) => tab.to_string(),
		_ => config
			.default_tab
			.clone()
			.or_else(|| tabs.first().map(|info| info.id.clone()))
			.unwrap_or_default(),
	}
}

impl SettingsPage {
	pub fn build(
		requested_tab: Option<&str>,
		tabs: &[TabInfo],
		schema: &Schema,
		settings: &SettingsContext,
		renderers: &RendererTable,
		ctx: &RenderContext<'_>,
		config: &EngineConfig,
	) -> Self {
		let active = active_tab(requested_tab, tabs, config);

		let tab_links = tabs
			.iter()
			.map(|info| TabLink {
				id: info.id.clone(),
				label: info.label.clone(),
				query: serde_urlencoded::to_string(&[("tab", info.id.as_str())]).unwrap_or_default(),
				active: info.id == active,
			})
			.collect();

		let rows = schema
			.fields(&active)
			.iter()
			.map(|field| FieldRow {
				id: field.id.clone(),
				label: field.name.clone(),
				control: renderers.render(field, settings.get(&field.id), ctx),
			})
			.collect();

		debug!("Built settings page for tab '{}'", active);
		SettingsPage {
			tabs: tab_links,
			active_tab: active,
			rows,
			show_submit: requested_tab != Some(config.help_tab.as_str()),
		}
	}
}

/// Whether the screen `hook` belongs to the settings UI
pub fn is_admin_page(hooks: &Hooks, config: &EngineConfig, hook: &str) -> bool {
	let pages = hooks.admin_pages.apply(vec![config.settings_page_hook.clone()], &());
	let ret = pages.iter().any(|page| page == hook);
	hooks.is_admin_page.apply(ret, &())
}

/// Whether supporting assets should load on the screen `hook`
pub fn should_load_admin_assets(hooks: &Hooks, config: &EngineConfig, hook: &str) -> bool {
	hooks.load_admin_assets.apply(is_admin_page(hooks, config, hook), hook)
}

/// Dispatch the admin action named by the action parameter of the POST and
/// then the GET parameters. Returns the number of handlers that ran.
pub fn process_actions(
	hooks: &Hooks,
	config: &EngineConfig,
	post: &RequestParams,
	get: &RequestParams,
) -> FpResult<usize> {
	let mut handled = 0;
	for params in [post, get] {
		if let Some(action) = params.get(&config.action_param) {
			debug!("Running admin action '{}'", action);
			handled += hooks.actions.run(action, params)?;
		}
	}
	Ok(handled)
}


// vim: ts=4
