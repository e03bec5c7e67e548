//! Base settings schema of the landing page overrides

use frontpage_core::{FieldSpec, FieldType, Schema, Tab};

use crate::prelude::*;

pub const LOGIN_STATUS_PAGES_TAB: &str = "login-status-pages";
pub const LOGGED_IN_FRONT_PAGE: &str = "logged_in_front_page";
pub const LOGGED_OUT_FRONT_PAGE: &str = "logged_out_front_page";

/// Single tab with a header and one page picker per login state
pub fn base_schema() -> FpResult<Schema> {
	let tab = Tab::new(LOGIN_STATUS_PAGES_TAB, "Login Status Pages")
		.with_field(
			FieldSpec::builder("login_status_pages_header")
				.name("Page Settings")
				.field_type(FieldType::Header)
				.build()?,
		)
		.with_field(
			FieldSpec::builder(LOGGED_IN_FRONT_PAGE)
				.name("Logged-In Front Page")
				.field_type(FieldType::Pages)
				.build()?,
		)
		.with_field(
			FieldSpec::builder(LOGGED_OUT_FRONT_PAGE)
				.name("Logged-Out Front Page")
				.field_type(FieldType::Pages)
				.build()?,
		);

	Schema::new().with_tab(tab)
}


// vim: ts=4
