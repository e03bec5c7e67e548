//! Settings context and persistence service
//!
//! The blob is read once per operation into a [`SettingsContext`]; option
//! lookups go through the context instead of a process-wide cache.

use std::sync::Arc;

use frontpage_types::option_store::OptionStore;
use frontpage_types::value::{blob_from_json, blob_to_json};

use crate::hooks::{Hooks, OptionQuery};
use crate::prelude::*;
use crate::sanitize::{SanitizeOutcome, Sanitizer};

/// In-memory copy of the settings blob for one operation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsContext {
	blob: SettingsBlob,
}

impl SettingsContext {
	pub fn new(blob: SettingsBlob) -> Self {
		Self { blob }
	}

	/// Raw stored value, without defaults or filters
	pub fn get(&self, key: &str) -> Option<&OptionValue> {
		self.blob.get(key)
	}

	/// Resolve an option: the stored value unless absent or empty, else
	/// `default`; then the `get_option` filters and the per-key filters.
	pub fn get_option(&self, hooks: &Hooks, key: &str, default: impl Into<OptionValue>) -> OptionValue {
		let default = default.into();
		let value = match self.blob.get(key) {
			Some(value) if !value.is_empty() => value.clone(),
			_ => default.clone(),
		};
		let query = OptionQuery { key: key.to_string(), default };
		let value = hooks.get_option.apply(value, &query);
		hooks.get_option_key.apply(key, value, &query)
	}

	pub fn blob(&self) -> &SettingsBlob {
		&self.blob
	}

	pub fn into_blob(self) -> SettingsBlob {
		self.blob
	}
}

/// Loads and stores the settings blob through an [`OptionStore`]
#[derive(Clone, Debug)]
pub struct SettingsService {
	store: Arc<dyn OptionStore>,
	option_key: String,
}

impl SettingsService {
	pub fn new(store: Arc<dyn OptionStore>, option_key: impl Into<String>) -> Self {
		Self { store, option_key: option_key.into() }
	}

	pub fn option_key(&self) -> &str {
		&self.option_key
	}

	/// Read the stored blob. An unset or empty option is provisioned as an empty blob.
	pub async fn load_blob(&self) -> FpResult<SettingsBlob> {
		match self.store.read_option(&self.option_key).await? {
			Some(value) if !OptionValue::Json(value.clone()).is_empty() => blob_from_json(value),
			_ => {
				info!("Provisioning empty settings under '{}'", self.option_key);
				let blob = SettingsBlob::new();
				self.save_blob(&blob).await?;
				Ok(blob)
			}
		}
	}

	/// Replace the stored blob
	pub async fn save_blob(&self, blob: &SettingsBlob) -> FpResult<()> {
		self.store.update_option(&self.option_key, blob_to_json(blob)?).await
	}

	/// Load the blob and pass it through the `get_settings` filters
	pub async fn load(&self, hooks: &Hooks) -> FpResult<SettingsContext> {
		let blob = self.load_blob().await?;
		Ok(SettingsContext::new(hooks.get_settings.apply(blob, &())))
	}

	/// Sanitize a submission against the stored blob and persist the result
	pub async fn save(
		&self,
		sanitizer: &Sanitizer<'_>,
		input: SettingsBlob,
		referer: Option<&str>,
	) -> FpResult<SanitizeOutcome> {
		let previous = self.load_blob().await?;
		let outcome = sanitizer.sanitize(input, referer, previous);
		self.save_blob(&outcome.blob).await?;
		Ok(outcome)
	}
}


// vim: ts=4
