//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::prelude::*;

/// Engine configuration
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
	/// Option key the settings blob is persisted under
	pub option_key: String,
	/// Tab shown when the requested tab is unknown (first tab if unset)
	pub default_tab: Option<String>,
	/// Tab assumed for a save whose referer carries no `tab` parameter
	pub fallback_tab: String,
	/// Tab rendered without a submit button
	pub help_tab: String,
	/// Screen hook of the settings page
	pub settings_page_hook: String,
	/// Request parameter naming the admin action to run
	pub action_param: String,
	/// Code of the notice emitted after a save
	pub notice_code: String,
	pub notice_message: String,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			option_key: "front_page_settings".into(),
			default_tab: None,
			fallback_tab: "settings".into(),
			help_tab: "help".into(),
			settings_page_hook: "settings_page_front-page-settings".into(),
			action_param: "front-page-action".into(),
			notice_code: "front-page-notices".into(),
			notice_message: "Settings updated.".into(),
		}
	}
}

impl EngineConfig {
	/// Load a configuration from a JSON file
	pub fn from_json_file(path: impl AsRef<Path>) -> FpResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)?;
		let config: Self = serde_json::from_str(&content)
			.map_err(|err| Error::ConfigError(format!("{}: {}", path.display(), err)))?;
		if config.option_key.is_empty() {
			return Err(Error::ConfigError("optionKey must not be empty".into()));
		}
		debug!("Loaded engine config from {}", path.display());
		Ok(config)
	}
}


// vim: ts=4
