//! Landing page resolution by login state
//!
//! The host asks two questions on every request: what the landing view shows
//! (`posts` listing or a static `page`), and which page that is. Each login
//! state can override the answer with a configured page; the `--default--`
//! sentinel leaves the host's own answer in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use frontpage_core::{Engine, SettingsContext};
use frontpage_types::auth::AuthState;

use crate::prelude::*;
use crate::settings::{LOGGED_IN_FRONT_PAGE, LOGGED_OUT_FRONT_PAGE};

/// What the landing view shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowOnFront {
	/// Default listing of latest posts
	Posts,
	/// A static page
	Page,
}

impl ShowOnFront {
	pub fn as_str(self) -> &'static str {
		match self {
			ShowOnFront::Posts => "posts",
			ShowOnFront::Page => "page",
		}
	}
}

impl fmt::Display for ShowOnFront {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ShowOnFront {
	type Err = Error;

	fn from_str(s: &str) -> FpResult<Self> {
		match s {
			"posts" => Ok(ShowOnFront::Posts),
			"page" => Ok(ShowOnFront::Page),
			_ => Err(Error::ValidationError(format!("unknown landing mode '{}'", s))),
		}
	}
}

/// The configured landing page of each login state
#[derive(Clone, Debug, PartialEq)]
pub struct PageOverrides {
	pub logged_in: OptionValue,
	pub logged_out: OptionValue,
}

impl Default for PageOverrides {
	fn default() -> Self {
		Self { logged_in: OptionValue::from(DEFAULT_SENTINEL), logged_out: OptionValue::from(DEFAULT_SENTINEL) }
	}
}

/// Empty values mean "not configured"
fn normalize(value: OptionValue) -> OptionValue {
	if value.is_empty() { OptionValue::from(DEFAULT_SENTINEL) } else { value }
}

impl PageOverrides {
	pub fn new(logged_in: impl Into<OptionValue>, logged_out: impl Into<OptionValue>) -> Self {
		Self { logged_in: normalize(logged_in.into()), logged_out: normalize(logged_out.into()) }
	}

	/// Read both overrides through the option filters
	pub fn from_settings(engine: &Engine, settings: &SettingsContext) -> Self {
		Self::new(
			engine.get_option(settings, LOGGED_IN_FRONT_PAGE, DEFAULT_SENTINEL),
			engine.get_option(settings, LOGGED_OUT_FRONT_PAGE, DEFAULT_SENTINEL),
		)
	}

	/// Neither login state overrides the landing page
	pub fn is_default(&self) -> bool {
		self.logged_in.is_sentinel() && self.logged_out.is_sentinel()
	}

	/// Override configured for the given login state, if any
	pub fn for_state(&self, authenticated: bool) -> Option<&OptionValue> {
		let page = if authenticated { &self.logged_in } else { &self.logged_out };
		(!page.is_sentinel()).then_some(page)
	}

	/// Switch a `posts` landing view to `page` when the visitor's login state has an override
	pub fn resolve_show_on_front(&self, requested: ShowOnFront, auth: &impl AuthState) -> ShowOnFront {
		if self.is_default() || requested == ShowOnFront::Page {
			return requested;
		}
		match self.for_state(auth.is_authenticated()) {
			Some(_) => ShowOnFront::Page,
			None => requested,
		}
	}

	/// The landing page id for the visitor's login state, else `requested`, as an integer
	pub fn resolve_page_on_front(&self, requested: &OptionValue, auth: &impl AuthState) -> i64 {
		if self.is_default() {
			return requested.to_int();
		}
		self.for_state(auth.is_authenticated()).unwrap_or(requested).to_int()
	}
}


// vim: ts=4
