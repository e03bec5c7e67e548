//! Settings schema: field specs grouped into tabs
//!
//! A [`Schema`] is an ordered list of tabs, each with an ordered list of
//! fields. The [`SchemaRegistry`] owns the base definition and computes the
//! effective schema per call by passing the base through the schema hooks.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::serde_as;
use std::collections::HashSet;
use std::fmt;

use crate::hooks::Hooks;
use crate::prelude::*;

/// Field type tag. Selects the renderer and the type-scoped sanitize hook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
	Header,
	Checkbox,
	Color,
	Editor,
	Info,
	Multicheck,
	Number,
	Pages,
	Password,
	Radio,
	Select,
	Text,
	Textarea,
	Upload,
	Hook,
	/// Type registered by an extension (or misspelled)
	Other(Box<str>),
}

impl FieldType {
	pub fn as_str(&self) -> &str {
		match self {
			FieldType::Header => "header",
			FieldType::Checkbox => "checkbox",
			FieldType::Color => "color",
			FieldType::Editor => "editor",
			FieldType::Info => "info",
			FieldType::Multicheck => "multicheck",
			FieldType::Number => "number",
			FieldType::Pages => "pages",
			FieldType::Password => "password",
			FieldType::Radio => "radio",
			FieldType::Select => "select",
			FieldType::Text => "text",
			FieldType::Textarea => "textarea",
			FieldType::Upload => "upload",
			FieldType::Hook => "hook",
			FieldType::Other(name) => name.as_ref(),
		}
	}

	pub fn parse(name: &str) -> Self {
		match name {
			"header" => FieldType::Header,
			"checkbox" => FieldType::Checkbox,
			"color" => FieldType::Color,
			"editor" => FieldType::Editor,
			"info" => FieldType::Info,
			"multicheck" => FieldType::Multicheck,
			"number" => FieldType::Number,
			"pages" => FieldType::Pages,
			"password" => FieldType::Password,
			"radio" => FieldType::Radio,
			"select" => FieldType::Select,
			"text" => FieldType::Text,
			"textarea" => FieldType::Textarea,
			"upload" => FieldType::Upload,
			"hook" => FieldType::Hook,
			other => FieldType::Other(other.into()),
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for FieldType {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for FieldType {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let name = String::deserialize(deserializer)?;
		Ok(FieldType::parse(&name))
	}
}

/// Type-specific field parameters. Every renderer reads only what it needs.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<String>,
	/// Option key to label, in display order
	#[serde_as(as = "serde_with::Map<_, _>")]
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<(String, String)>,
	/// Field default
	#[serde(skip_serializing_if = "Option::is_none")]
	pub std: Option<OptionValue>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rows: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buttons: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wpautop: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub teeny: Option<bool>,
	pub notice: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub style: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub header: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class: Option<String>,
}

/// A single setting declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
	/// Key of the value in the settings blob
	#[serde(default)]
	pub id: String,
	/// Display name
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub desc: String,
	#[serde(rename = "type")]
	pub field_type: FieldType,
	#[serde(flatten)]
	pub params: FieldParams,
}

impl FieldSpec {
	/// Create a builder for constructing a FieldSpec
	pub fn builder(id: impl Into<String>) -> FieldSpecBuilder {
		FieldSpecBuilder::new(id)
	}
}

/// Builder for FieldSpec with fluent API
pub struct FieldSpecBuilder {
	id: String,
	name: String,
	desc: String,
	field_type: FieldType,
	params: FieldParams,
}

impl FieldSpecBuilder {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: String::new(),
			desc: String::new(),
			field_type: FieldType::Text,
			params: FieldParams::default(),
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn desc(mut self, desc: impl Into<String>) -> Self {
		self.desc = desc.into();
		self
	}

	/// Set the field type (defaults to text)
	pub fn field_type(mut self, field_type: FieldType) -> Self {
		self.field_type = field_type;
		self
	}

	pub fn std(mut self, value: impl Into<OptionValue>) -> Self {
		self.params.std = Some(value.into());
		self
	}

	/// Append an option (select, radio, multicheck)
	pub fn option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
		self.params.options.push((key.into(), label.into()));
		self
	}

	pub fn size(mut self, size: impl Into<String>) -> Self {
		self.params.size = Some(size.into());
		self
	}

	pub fn range(mut self, min: f64, max: f64, step: f64) -> Self {
		self.params.min = Some(min);
		self.params.max = Some(max);
		self.params.step = Some(step);
		self
	}

	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.params.placeholder = Some(placeholder.into());
		self
	}

	/// Replace all type parameters at once
	pub fn params(mut self, params: FieldParams) -> Self {
		self.params = params;
		self
	}

	pub fn build(self) -> FpResult<FieldSpec> {
		if self.id.is_empty() {
			return Err(Error::ConfigError("Field id is required".into()));
		}
		Ok(FieldSpec {
			id: self.id,
			name: self.name,
			desc: self.desc,
			field_type: self.field_type,
			params: self.params,
		})
	}
}

/// Tab id and label, as shown in the tab navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
	pub id: String,
	pub label: String,
}

impl TabInfo {
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self { id: id.into(), label: label.into() }
	}
}

/// A named group of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(default, deserialize_with = "deserialize_fields")]
	pub fields: Vec<FieldSpec>,
}

impl Tab {
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self { id: id.into(), label: label.into(), fields: Vec::new() }
	}

	pub fn with_field(mut self, field: FieldSpec) -> Self {
		self.fields.push(field);
		self
	}

	pub fn field(&self, id: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|f| f.id == id)
	}

	pub fn info(&self) -> TabInfo {
		TabInfo::new(self.id.clone(), self.label.clone())
	}
}

/// Accepts either a list of fields or a keyed map. In a keyed map a
/// numeric-looking key takes the id from the nested `id`; any other key
/// is the id itself.
fn deserialize_fields<'de, D>(deserializer: D) -> Result<Vec<FieldSpec>, D::Error>
where
	D: Deserializer<'de>,
{
	struct FieldsVisitor;

	impl<'de> Visitor<'de> for FieldsVisitor {
		type Value = Vec<FieldSpec>;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a list of fields or a map of field id to field")
		}

		fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
			let mut fields = Vec::new();
			while let Some(field) = seq.next_element::<FieldSpec>()? {
				fields.push(field);
			}
			Ok(fields)
		}

		fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
			let mut fields = Vec::new();
			while let Some((key, mut field)) = map.next_entry::<String, FieldSpec>()? {
				if key.parse::<i64>().is_err() {
					field.id = key;
				}
				fields.push(field);
			}
			Ok(fields)
		}
	}

	let fields = deserializer.deserialize_any(FieldsVisitor)?;
	if let Some(field) = fields.iter().find(|f| f.id.is_empty()) {
		return Err(de::Error::custom(format!(
			"field of type '{}' has no id",
			field.field_type
		)));
	}
	Ok(fields)
}

/// Ordered collection of tabs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
	tabs: Vec<Tab>,
}

impl Schema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a schema from JSON (a list of tabs)
	pub fn from_json(value: serde_json::Value) -> FpResult<Self> {
		let schema: Schema = serde_json::from_value(value)?;
		schema.validate()?;
		Ok(schema)
	}

	/// Append a tab. Tab ids must be unique.
	pub fn push_tab(&mut self, tab: Tab) -> FpResult<()> {
		if self.tab(&tab.id).is_some() {
			return Err(Error::ConfigError(format!("Tab '{}' is already registered", tab.id)));
		}
		debug!("Registering settings tab: {} ({} fields)", tab.id, tab.fields.len());
		self.tabs.push(tab);
		Ok(())
	}

	pub fn with_tab(mut self, tab: Tab) -> FpResult<Self> {
		self.push_tab(tab)?;
		Ok(self)
	}

	pub fn tabs(&self) -> &[Tab] {
		&self.tabs
	}

	pub fn tab(&self, id: &str) -> Option<&Tab> {
		self.tabs.iter().find(|t| t.id == id)
	}

	pub fn tab_mut(&mut self, id: &str) -> Option<&mut Tab> {
		self.tabs.iter_mut().find(|t| t.id == id)
	}

	/// Fields of a tab, empty if the tab is unknown
	pub fn fields(&self, tab: &str) -> &[FieldSpec] {
		self.tab(tab).map(|t| t.fields.as_slice()).unwrap_or_default()
	}

	pub fn field(&self, tab: &str, id: &str) -> Option<&FieldSpec> {
		self.tab(tab)?.field(id)
	}

	pub fn field_type(&self, tab: &str, id: &str) -> Option<&FieldType> {
		self.field(tab, id).map(|f| &f.field_type)
	}

	pub fn tab_infos(&self) -> Vec<TabInfo> {
		self.tabs.iter().map(Tab::info).collect()
	}

	/// Tab ids and field ids within a tab must be unique
	pub fn validate(&self) -> FpResult<()> {
		let mut tab_ids = HashSet::new();
		for tab in &self.tabs {
			if !tab_ids.insert(tab.id.as_str()) {
				return Err(Error::ConfigError(format!("Tab '{}' is declared twice", tab.id)));
			}
			let mut field_ids = HashSet::new();
			for field in &tab.fields {
				if !field_ids.insert(field.id.as_str()) {
					return Err(Error::ConfigError(format!(
						"Field '{}' is declared twice in tab '{}'",
						field.id, tab.id
					)));
				}
			}
		}
		Ok(())
	}
}

/// Owns the base schema and derives the effective one through the hooks
#[derive(Debug)]
pub struct SchemaRegistry {
	base: Schema,
}

impl SchemaRegistry {
	pub fn new(base: Schema) -> FpResult<Self> {
		base.validate()?;
		Ok(Self { base })
	}

	pub fn base(&self) -> &Schema {
		&self.base
	}

	/// Tab navigation: base tabs passed through the `settings_tabs` hook
	pub fn tabs(&self, hooks: &Hooks) -> Vec<TabInfo> {
		hooks.settings_tabs.apply(self.base.tab_infos(), &())
	}

	/// Effective schema: each base tab's fields pass through the per-tab
	/// hook, then the whole schema through `registered_settings`.
	pub fn schema(&self, hooks: &Hooks) -> Schema {
		let mut schema = self.base.clone();
		for tab in &mut schema.tabs {
			let fields = std::mem::take(&mut tab.fields);
			tab.fields = hooks.tab_fields.apply(&tab.id, fields, &());
		}
		hooks.registered_settings.apply(schema, &())
	}
}


// vim: ts=4
