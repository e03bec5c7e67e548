//! Save-time sanitization pipeline
//!
//! A save carries the submitted values plus the referring URL of the form. The
//! `tab` query parameter of the referer names the tab the form was rendered for;
//! the tab's schema decides which per-type sanitizers run and which stored keys
//! an omitted value resets.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::hooks::{HookRegistry, Hooks};
use crate::prelude::*;
use crate::schema::{FieldType, Schema};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
	Updated,
	Error,
}

/// User-visible notice produced by a save
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
	pub code: String,
	pub message: String,
	pub kind: NoticeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SanitizeOutcome {
	pub blob: SettingsBlob,
	/// Present when the pipeline ran; absent when the input passed through untouched
	pub notice: Option<Notice>,
}

/// Extract the `tab` query parameter of a referring URL
pub fn referer_tab(referer: &str) -> Option<String> {
	let (_, query) = referer.split_once('?')?;
	let query = query.split_once('#').map_or(query, |(query, _)| query);
	let params: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
	params.into_iter().find(|(name, _)| name == "tab").map(|(_, tab)| tab).filter(|tab| !tab.is_empty())
}

/// Sanitizes submitted settings against the effective schema
pub struct Sanitizer<'a> {
	pub schema: &'a Schema,
	pub hooks: &'a Hooks,
	pub config: &'a EngineConfig,
}

impl Sanitizer<'_> {
	/// Produce the blob to persist from `input` and the stored `previous` blob.
	///
	/// Without a referer there is no tab context and `input` is returned as is.
	pub fn sanitize(
		&self,
		input: SettingsBlob,
		referer: Option<&str>,
		previous: SettingsBlob,
	) -> SanitizeOutcome {
		let Some(referer) = referer.filter(|referer| !referer.is_empty()) else {
			warn!("Settings saved without a referer, skipping sanitization");
			return SanitizeOutcome { blob: input, notice: None };
		};
		let tab = referer_tab(referer).unwrap_or_else(|| self.config.fallback_tab.clone());
		debug!("Sanitizing {} submitted settings for tab '{}'", input.len(), tab);

		let input = self.hooks.sanitize_tab.apply(&tab, input, &());

		let mut sanitized = SettingsBlob::new();
		for (key, value) in input {
			let value = match self.schema.field_type(&tab, &key) {
				Some(field_type) => self.hooks.sanitize_type.apply(field_type.as_str(), value, &key),
				None => value,
			};
			let value = self.hooks.sanitize_generic.apply(value, &key);
			sanitized.insert(key, value);
		}

		// Omitted or emptied fields of the submitted tab reset to their default
		let mut blob = previous;
		for field in self.schema.fields(&tab) {
			if sanitized.get(&field.id).is_none_or(OptionValue::is_empty) {
				sanitized.remove(&field.id);
				if blob.remove(&field.id).is_some() {
					debug!("Reset setting '{}'", field.id);
				}
			}
		}
		blob.extend(sanitized);

		info!("Settings updated from tab '{}' ({} keys stored)", tab, blob.len());
		SanitizeOutcome {
			blob,
			notice: Some(Notice {
				code: self.config.notice_code.clone(),
				message: self.config.notice_message.clone(),
				kind: NoticeKind::Updated,
			}),
		}
	}
}

/// Trim surrounding whitespace
pub fn sanitize_text(value: OptionValue, _key: &str) -> OptionValue {
	match value {
		OptionValue::String(s) if s.trim().len() != s.len() => OptionValue::String(s.trim().to_string()),
		value => value,
	}
}

/// Page ids become integers; the default sentinel is kept
pub fn sanitize_pages(value: OptionValue, _key: &str) -> OptionValue {
	match value {
		OptionValue::String(s) if !s.is_empty() && s != DEFAULT_SENTINEL => match s.trim().parse::<i64>() {
			Ok(id) => OptionValue::Int(id),
			Err(_) => OptionValue::String(s),
		},
		value => value,
	}
}

/// Numeric strings become integers or floats
pub fn sanitize_number(value: OptionValue, _key: &str) -> OptionValue {
	let OptionValue::String(s) = value else {
		return value;
	};
	let trimmed = s.trim();
	if let Ok(i) = trimmed.parse::<i64>() {
		return OptionValue::Int(i);
	}
	match trimmed.parse::<f64>() {
		Ok(f) if f.is_finite() => OptionValue::Float(f),
		_ => OptionValue::String(s),
	}
}

/// Any checked value is stored as 1
pub fn sanitize_checkbox(value: OptionValue, _key: &str) -> OptionValue {
	if value.is_empty() { value } else { OptionValue::Int(1) }
}

/// Register the sanitizers of the built-in field types
pub fn register_default_sanitizers(registry: &mut HookRegistry) {
	registry
		.add_sanitize_type(FieldType::Text.as_str(), sanitize_text)
		.add_sanitize_type(FieldType::Pages.as_str(), sanitize_pages)
		.add_sanitize_type(FieldType::Number.as_str(), sanitize_number)
		.add_sanitize_type(FieldType::Checkbox.as_str(), sanitize_checkbox);
}


// vim: ts=4
