//! Field renderers
//!
//! A renderer turns a field spec and its current value into a [`Control`],
//! a structural description of the form control the host UI draws. Renderers
//! are looked up by field type name. A type without a renderer falls back to
//! the missing renderer, which names the offending field instead of failing.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use frontpage_types::content_catalog::PageRef;

use crate::hooks::Hooks;
use crate::prelude::*;
use crate::schema::{FieldSpec, FieldType};

const DEFAULT_SIZE: &str = "regular";

/// One selectable entry of a select, radio group or checkbox group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
	pub value: String,
	pub label: String,
	pub selected: bool,
}

/// Structural description of a rendered settings control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
	Separator,
	/// Rendered nothing (e.g. a choice field without options)
	Empty,
	Checkbox {
		name: String,
		checked: bool,
		label: String,
	},
	ColorPicker {
		name: String,
		value: String,
		default_color: String,
		label: String,
	},
	Editor {
		name: String,
		value: String,
		rows: u32,
		wpautop: bool,
		media_buttons: bool,
		teeny: bool,
		label: String,
	},
	Info {
		name: String,
		notice: bool,
		style: String,
		header: Option<String>,
		icon: Option<String>,
		class: String,
		desc: String,
	},
	CheckboxGroup {
		name: String,
		items: Vec<Choice>,
		description: String,
	},
	NumberInput {
		name: String,
		value: String,
		min: f64,
		max: f64,
		step: f64,
		size: String,
		label: String,
	},
	PasswordInput {
		name: String,
		value: String,
		size: String,
		label: String,
	},
	RadioGroup {
		name: String,
		items: Vec<Choice>,
		description: String,
	},
	Select {
		name: String,
		placeholder: String,
		options: Vec<Choice>,
		label: String,
	},
	TextInput {
		name: String,
		value: String,
		size: String,
		label: String,
	},
	TextArea {
		name: String,
		value: String,
		label: String,
	},
	Upload {
		name: String,
		value: String,
		size: String,
		button_label: String,
		label: String,
	},
	/// Content contributed by `field_<id>` hooks
	Hook {
		id: String,
		content: Vec<Control>,
	},
	/// Diagnostic for a field whose type has no renderer
	Missing {
		field_id: String,
		field_type: String,
		message: String,
	},
}

/// Read-only inputs a renderer may consult besides the field and its value
pub struct RenderContext<'a> {
	/// Option key the form posts under; controls are named `<option_key>[<id>]`
	pub option_key: &'a str,
	/// Page catalog for `pages` fields
	pub pages: &'a [PageRef],
	pub hooks: &'a Hooks,
}

impl RenderContext<'_> {
	pub fn field_name(&self, field: &FieldSpec) -> String {
		format!("{}[{}]", self.option_key, field.id)
	}
}

/// Renderer function type
pub type Renderer =
	Arc<dyn Fn(&FieldSpec, Option<&OptionValue>, &RenderContext<'_>) -> Control + Send + Sync>;

/// Value to display: the current value, else the field default
fn resolve_value(field: &FieldSpec, current: Option<&OptionValue>) -> Option<OptionValue> {
	current.cloned().or_else(|| field.params.std.clone())
}

fn display_value(field: &FieldSpec, current: Option<&OptionValue>) -> String {
	resolve_value(field, current).map(|v| v.to_string()).unwrap_or_default()
}

fn size_of(field: &FieldSpec) -> String {
	field.params.size.clone().unwrap_or_else(|| DEFAULT_SIZE.into())
}

fn choices(options: &[(String, String)], value: Option<&OptionValue>) -> Vec<Choice> {
	options
		.iter()
		.map(|(key, label)| Choice {
			value: key.clone(),
			label: label.clone(),
			selected: value.is_some_and(|v| v.matches_key(key)),
		})
		.collect()
}

pub fn render_header(_field: &FieldSpec, _current: Option<&OptionValue>, _ctx: &RenderContext<'_>) -> Control {
	Control::Separator
}

pub fn render_checkbox(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::Checkbox {
		name: ctx.field_name(field),
		checked: resolve_value(field, current).is_some_and(|v| v.to_int() == 1),
		label: field.desc.clone(),
	}
}

pub fn render_color(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::ColorPicker {
		name: ctx.field_name(field),
		value: display_value(field, current),
		default_color: field.params.std.as_ref().map(ToString::to_string).unwrap_or_default(),
		label: field.desc.clone(),
	}
}

pub fn render_editor(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::Editor {
		name: ctx.field_name(field),
		value: display_value(field, current),
		rows: field.params.rows.unwrap_or(10),
		wpautop: field.params.wpautop.unwrap_or(true),
		media_buttons: field.params.buttons.unwrap_or(true),
		teeny: field.params.teeny.unwrap_or(false),
		label: field.desc.clone(),
	}
}

pub fn render_info(field: &FieldSpec, _current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::Info {
		name: ctx.field_name(field),
		notice: field.params.notice,
		style: field.params.style.clone().unwrap_or_else(|| "normal".into()),
		header: field.params.header.clone(),
		icon: field.params.icon.clone(),
		class: field.params.class.clone().unwrap_or_default(),
		desc: field.desc.clone(),
	}
}

pub fn render_multicheck(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	if field.params.options.is_empty() {
		return Control::Empty;
	}
	let value = resolve_value(field, current);
	Control::CheckboxGroup {
		name: ctx.field_name(field),
		items: choices(&field.params.options, value.as_ref()),
		description: field.desc.clone(),
	}
}

pub fn render_number(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::NumberInput {
		name: ctx.field_name(field),
		value: display_value(field, current),
		min: field.params.min.unwrap_or(0.0),
		max: field.params.max.unwrap_or(999_999.0),
		step: field.params.step.unwrap_or(1.0),
		size: size_of(field),
		label: field.desc.clone(),
	}
}

/// Page picker: the `--default--` sentinel followed by the page catalog
pub fn render_pages(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	let mut options = Vec::with_capacity(ctx.pages.len() + 1);
	options.push((DEFAULT_SENTINEL.to_string(), "--Default--".to_string()));
	options.extend(ctx.pages.iter().map(|page| (page.id.to_string(), page.title.clone())));

	let value = resolve_value(field, current);
	Control::Select {
		name: ctx.field_name(field),
		placeholder: field.params.placeholder.clone().unwrap_or_default(),
		options: choices(&options, value.as_ref()),
		label: field.desc.clone(),
	}
}

pub fn render_password(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::PasswordInput {
		name: ctx.field_name(field),
		value: display_value(field, current),
		size: size_of(field),
		label: field.desc.clone(),
	}
}

pub fn render_radio(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	if field.params.options.is_empty() {
		return Control::Empty;
	}
	let value = resolve_value(field, current);
	Control::RadioGroup {
		name: ctx.field_name(field),
		items: choices(&field.params.options, value.as_ref()),
		description: field.desc.clone(),
	}
}

pub fn render_select(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	let value = resolve_value(field, current);
	Control::Select {
		name: ctx.field_name(field),
		placeholder: field.params.placeholder.clone().unwrap_or_default(),
		options: choices(&field.params.options, value.as_ref()),
		label: field.desc.clone(),
	}
}

pub fn render_text(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::TextInput {
		name: ctx.field_name(field),
		value: display_value(field, current),
		size: size_of(field),
		label: field.desc.clone(),
	}
}

pub fn render_textarea(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::TextArea {
		name: ctx.field_name(field),
		value: display_value(field, current),
		label: field.desc.clone(),
	}
}

pub fn render_upload(field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::Upload {
		name: ctx.field_name(field),
		value: display_value(field, current),
		size: size_of(field),
		button_label: "Upload File".into(),
		label: field.desc.clone(),
	}
}

pub fn render_hook(field: &FieldSpec, _current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
	Control::Hook {
		id: field.id.clone(),
		content: ctx.hooks.field_hooks.apply(&field.id, Vec::new(), field),
	}
}

pub fn render_missing(field: &FieldSpec, _current: Option<&OptionValue>, _ctx: &RenderContext<'_>) -> Control {
	Control::Missing {
		field_id: field.id.clone(),
		field_type: field.field_type.to_string(),
		message: format!(
			"The renderer used for the {} setting is missing (type '{}').",
			field.id, field.field_type
		),
	}
}

/// Mutable renderer registry used during engine initialization
pub struct RendererRegistry {
	renderers: HashMap<Box<str>, Renderer>,
}

impl RendererRegistry {
	pub fn new() -> Self {
		Self { renderers: HashMap::new() }
	}

	/// Registry pre-populated with the built-in field types
	pub fn with_builtins() -> Self {
		let builtins: [(FieldType, fn(&FieldSpec, Option<&OptionValue>, &RenderContext<'_>) -> Control); 15] = [
			(FieldType::Header, render_header),
			(FieldType::Checkbox, render_checkbox),
			(FieldType::Color, render_color),
			(FieldType::Editor, render_editor),
			(FieldType::Info, render_info),
			(FieldType::Multicheck, render_multicheck),
			(FieldType::Number, render_number),
			(FieldType::Pages, render_pages),
			(FieldType::Password, render_password),
			(FieldType::Radio, render_radio),
			(FieldType::Select, render_select),
			(FieldType::Text, render_text),
			(FieldType::Textarea, render_textarea),
			(FieldType::Upload, render_upload),
			(FieldType::Hook, render_hook),
		];

		let mut registry = Self::new();
		for (field_type, renderer) in builtins {
			registry.renderers.insert(field_type.as_str().into(), Arc::new(renderer));
		}
		registry
	}

	/// Register a renderer for a new field type
	pub fn register<F>(&mut self, field_type: &str, renderer: F) -> FpResult<()>
	where
		F: Fn(&FieldSpec, Option<&OptionValue>, &RenderContext<'_>) -> Control + Send + Sync + 'static,
	{
		if self.renderers.contains_key(field_type) {
			return Err(Error::ConfigError(format!(
				"Renderer for field type '{}' is already registered",
				field_type
			)));
		}
		debug!("Registering renderer: {}", field_type);
		self.renderers.insert(field_type.into(), Arc::new(renderer));
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> RendererTable {
		debug!("Freezing renderer registry with {} field types", self.renderers.len());
		RendererTable { renderers: self.renderers }
	}
}

impl Default for RendererRegistry {
	fn default() -> Self {
		Self::with_builtins()
	}
}

/// Immutable renderer table held by the engine
pub struct RendererTable {
	renderers: HashMap<Box<str>, Renderer>,
}

impl RendererTable {
	pub fn contains(&self, field_type: &str) -> bool {
		self.renderers.contains_key(field_type)
	}

	/// Render a field. Never fails: unknown types render the missing diagnostic.
	pub fn render(&self, field: &FieldSpec, current: Option<&OptionValue>, ctx: &RenderContext<'_>) -> Control {
		match self.renderers.get(field.field_type.as_str()) {
			Some(renderer) => renderer(field, current, ctx),
			None => {
				warn!("No renderer for field '{}' of type '{}'", field.id, field.field_type);
				render_missing(field, current, ctx)
			}
		}
	}
}

impl fmt::Debug for RendererTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut types: Vec<&str> = self.renderers.keys().map(AsRef::as_ref).collect();
		types.sort_unstable();
		f.debug_struct("RendererTable").field("types", &types).finish()
	}
}


// vim: ts=4
