//! Hook registry: named, ordered callback chains
//!
//! Every extension point has a fixed callback signature. Filters are value-in,
//! value-out transforms folded in registration order; a hook nobody registered
//! for is the identity. Actions are side-effecting handlers run in order.
//!
//! Hooks are registered on a mutable [`HookRegistry`] during startup and then
//! frozen into an immutable [`Hooks`] value shared by the engine.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::prelude::*;
use crate::render::Control;
use crate::schema::{FieldSpec, Schema, TabInfo};

/// Ordered chain of filters for one hook
pub struct FilterChain<T, A: ?Sized = ()> {
	callbacks: Vec<Arc<dyn Fn(T, &A) -> T + Send + Sync>>,
}

impl<T, A: ?Sized> FilterChain<T, A> {
	pub fn new() -> Self {
		Self { callbacks: Vec::new() }
	}

	pub fn add<F>(&mut self, f: F)
	where
		F: Fn(T, &A) -> T + Send + Sync + 'static,
	{
		self.callbacks.push(Arc::new(f));
	}

	/// Folds `value` through every callback in registration order
	pub fn apply(&self, value: T, args: &A) -> T {
		self.callbacks.iter().fold(value, |value, f| f(value, args))
	}

	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}
}

impl<T, A: ?Sized> Default for FilterChain<T, A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, A: ?Sized> fmt::Debug for FilterChain<T, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterChain").field("callbacks", &self.callbacks.len()).finish()
	}
}

/// A family of filter chains addressed by name (e.g. one chain per field type)
pub struct NamedFilters<T, A: ?Sized = ()> {
	slots: HashMap<Box<str>, FilterChain<T, A>>,
}

impl<T, A: ?Sized> NamedFilters<T, A> {
	pub fn new() -> Self {
		Self { slots: HashMap::new() }
	}

	pub fn add<F>(&mut self, name: &str, f: F)
	where
		F: Fn(T, &A) -> T + Send + Sync + 'static,
	{
		self.slots.entry(name.into()).or_default().add(f);
	}

	/// Runs the chain registered under `name`, identity if there is none
	pub fn apply(&self, name: &str, value: T, args: &A) -> T {
		match self.slots.get(name) {
			Some(chain) => chain.apply(value, args),
			None => value,
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.slots.get(name).is_some_and(|chain| !chain.is_empty())
	}
}

impl<T, A: ?Sized> Default for NamedFilters<T, A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, A: ?Sized> fmt::Debug for NamedFilters<T, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.slots.iter().map(|(k, v)| (k, v.len()))).finish()
	}
}

/// A family of side-effecting handler lists addressed by name
pub struct NamedActions<A: ?Sized> {
	slots: HashMap<Box<str>, Vec<Arc<dyn Fn(&A) -> FpResult<()> + Send + Sync>>>,
}

impl<A: ?Sized> NamedActions<A> {
	pub fn new() -> Self {
		Self { slots: HashMap::new() }
	}

	pub fn add<F>(&mut self, name: &str, f: F)
	where
		F: Fn(&A) -> FpResult<()> + Send + Sync + 'static,
	{
		self.slots.entry(name.into()).or_default().push(Arc::new(f));
	}

	/// Runs every handler registered under `name`, stopping at the first error.
	/// Returns the number of handlers that ran.
	pub fn run(&self, name: &str, args: &A) -> FpResult<usize> {
		let Some(handlers) = self.slots.get(name) else {
			return Ok(0);
		};
		for handler in handlers {
			handler(args)?;
		}
		Ok(handlers.len())
	}
}

impl<A: ?Sized> Default for NamedActions<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: ?Sized> fmt::Debug for NamedActions<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.slots.iter().map(|(k, v)| (k, v.len()))).finish()
	}
}

/// Arguments passed to option read filters
#[derive(Debug, Clone)]
pub struct OptionQuery {
	pub key: String,
	pub default: OptionValue,
}

/// Request parameters handed to admin action handlers
pub type RequestParams = std::collections::BTreeMap<String, String>;

/// Mutable hook registry used during engine initialization
#[derive(Debug, Default)]
pub struct HookRegistry {
	hooks: Hooks,
}

impl HookRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Extend or reorder the settings tab list
	pub fn add_settings_tabs<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(Vec<TabInfo>) -> Vec<TabInfo> + Send + Sync + 'static,
	{
		self.hooks.settings_tabs.add(move |tabs, _: &()| f(tabs));
		self
	}

	/// Modify the whole effective schema
	pub fn add_registered_settings<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(Schema) -> Schema + Send + Sync + 'static,
	{
		self.hooks.registered_settings.add(move |schema, _: &()| f(schema));
		self
	}

	/// Modify the field list of one base tab
	pub fn add_tab_fields<F>(&mut self, tab: &str, f: F) -> &mut Self
	where
		F: Fn(Vec<FieldSpec>) -> Vec<FieldSpec> + Send + Sync + 'static,
	{
		self.hooks.tab_fields.add(tab, move |fields, _: &()| f(fields));
		self
	}

	/// Transform the settings blob right after it is loaded
	pub fn add_get_settings<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(SettingsBlob) -> SettingsBlob + Send + Sync + 'static,
	{
		self.hooks.get_settings.add(move |blob, _: &()| f(blob));
		self
	}

	/// Whole-input transform for saves originating from `tab`
	pub fn add_sanitize_tab<F>(&mut self, tab: &str, f: F) -> &mut Self
	where
		F: Fn(SettingsBlob) -> SettingsBlob + Send + Sync + 'static,
	{
		self.hooks.sanitize_tab.add(tab, move |blob, _: &()| f(blob));
		self
	}

	/// Per-value transform for fields of type `field_type`
	pub fn add_sanitize_type<F>(&mut self, field_type: &str, f: F) -> &mut Self
	where
		F: Fn(OptionValue, &str) -> OptionValue + Send + Sync + 'static,
	{
		self.hooks.sanitize_type.add(field_type, f);
		self
	}

	/// Per-value transform applied to every submitted key
	pub fn add_sanitize_generic<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(OptionValue, &str) -> OptionValue + Send + Sync + 'static,
	{
		self.hooks.sanitize_generic.add(f);
		self
	}

	/// Override any option read
	pub fn add_get_option<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(OptionValue, &OptionQuery) -> OptionValue + Send + Sync + 'static,
	{
		self.hooks.get_option.add(f);
		self
	}

	/// Override reads of one option key
	pub fn add_get_option_key<F>(&mut self, key: &str, f: F) -> &mut Self
	where
		F: Fn(OptionValue, &OptionQuery) -> OptionValue + Send + Sync + 'static,
	{
		self.hooks.get_option_key.add(key, f);
		self
	}

	/// Extend the set of admin screens that belong to the settings UI
	pub fn add_admin_pages<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(Vec<String>) -> Vec<String> + Send + Sync + 'static,
	{
		self.hooks.admin_pages.add(move |pages, _: &()| f(pages));
		self
	}

	/// Override the admin screen decision
	pub fn add_is_admin_page<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(bool) -> bool + Send + Sync + 'static,
	{
		self.hooks.is_admin_page.add(move |ret, _: &()| f(ret));
		self
	}

	/// Override whether supporting assets load on a screen
	pub fn add_load_admin_assets<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(bool, &str) -> bool + Send + Sync + 'static,
	{
		self.hooks.load_admin_assets.add(f);
		self
	}

	/// Handle the admin action `name`
	pub fn add_action<F>(&mut self, name: &str, f: F) -> &mut Self
	where
		F: Fn(&RequestParams) -> FpResult<()> + Send + Sync + 'static,
	{
		self.hooks.actions.add(name, f);
		self
	}

	/// Produce content for `hook` fields with the given id
	pub fn add_field_hook<F>(&mut self, field_id: &str, f: F) -> &mut Self
	where
		F: Fn(&FieldSpec) -> Vec<Control> + Send + Sync + 'static,
	{
		self.hooks.field_hooks.add(field_id, move |mut content: Vec<Control>, field| {
			content.extend(f(field));
			content
		});
		self
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> Hooks {
		debug!("Freezing hook registry: {:?}", self.hooks);
		self.hooks
	}
}

/// Immutable hook set held by the engine
#[derive(Debug, Default)]
pub struct Hooks {
	pub settings_tabs: FilterChain<Vec<TabInfo>>,
	pub registered_settings: FilterChain<Schema>,
	pub tab_fields: NamedFilters<Vec<FieldSpec>>,
	pub get_settings: FilterChain<SettingsBlob>,
	pub sanitize_tab: NamedFilters<SettingsBlob>,
	pub sanitize_type: NamedFilters<OptionValue, str>,
	pub sanitize_generic: FilterChain<OptionValue, str>,
	pub get_option: FilterChain<OptionValue, OptionQuery>,
	pub get_option_key: NamedFilters<OptionValue, OptionQuery>,
	pub admin_pages: FilterChain<Vec<String>>,
	pub is_admin_page: FilterChain<bool>,
	pub load_admin_assets: FilterChain<bool, str>,
	pub actions: NamedActions<RequestParams>,
	pub field_hooks: NamedFilters<Vec<Control>, FieldSpec>,
}


// vim: ts=4
