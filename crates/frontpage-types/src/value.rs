//! Settings values and the persisted settings blob
//!
//! Values are a tagged union so each field type can rely on a concrete shape,
//! but they serialize untagged: the persisted blob stays a flat JSON object of
//! field id to plain value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::FpResult;

/// Marker for "no override configured, use the host default"
pub const DEFAULT_SENTINEL: &str = "--default--";

/// The persisted configuration: field id to value
pub type SettingsBlob = BTreeMap<String, OptionValue>;

/// A single settings value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // Shape is resolved through the field type, not a tag
pub enum OptionValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	Float(f64),
	String(String),
	/// Selected option keys (multicheck)
	List(Vec<String>),
	Json(serde_json::Value),
}

impl OptionValue {
	/// Host emptiness rule: `false`, `0`, `""`, `"0"`, empty lists and `null` are empty.
	/// An empty submitted value is the reset signal, never a stored value.
	pub fn is_empty(&self) -> bool {
		match self {
			OptionValue::Bool(b) => !b,
			OptionValue::Int(i) => *i == 0,
			OptionValue::Float(f) => *f == 0.0,
			OptionValue::String(s) => s.is_empty() || s == "0",
			OptionValue::List(l) => l.is_empty(),
			OptionValue::Json(j) => match j {
				serde_json::Value::Null => true,
				serde_json::Value::Bool(b) => !b,
				serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
				serde_json::Value::String(s) => s.is_empty() || s == "0",
				serde_json::Value::Array(a) => a.is_empty(),
				serde_json::Value::Object(o) => o.is_empty(),
			},
		}
	}

	/// Whether this is the `--default--` sentinel
	pub fn is_sentinel(&self) -> bool {
		matches!(self, OptionValue::String(s) if s == DEFAULT_SENTINEL)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Integer coercion: leading signed integer of strings, truncated floats,
	/// `true` as 1, everything else 0.
	pub fn to_int(&self) -> i64 {
		match self {
			OptionValue::Bool(b) => i64::from(*b),
			OptionValue::Int(i) => *i,
			OptionValue::Float(f) => *f as i64,
			OptionValue::String(s) => leading_int(s),
			OptionValue::List(l) => i64::from(!l.is_empty()),
			OptionValue::Json(j) => match j {
				serde_json::Value::Bool(b) => i64::from(*b),
				serde_json::Value::Number(n) => {
					n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0)
				}
				serde_json::Value::String(s) => leading_int(s),
				_ => 0,
			},
		}
	}

	/// Whether the value selects the option `key` (loose comparison by text)
	pub fn matches_key(&self, key: &str) -> bool {
		match self {
			OptionValue::List(l) => l.iter().any(|k| k == key),
			v => v.to_string() == key,
		}
	}

	/// Get the type name for diagnostics
	pub fn type_name(&self) -> &'static str {
		match self {
			OptionValue::Bool(_) => "bool",
			OptionValue::Int(_) => "int",
			OptionValue::Float(_) => "float",
			OptionValue::String(_) => "string",
			OptionValue::List(_) => "list",
			OptionValue::Json(_) => "json",
		}
	}
}

/// Text form used when a value is shown in a control
impl fmt::Display for OptionValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionValue::Bool(true) => write!(f, "1"),
			OptionValue::Bool(false) => Ok(()),
			OptionValue::Int(i) => write!(f, "{}", i),
			OptionValue::Float(v) => write!(f, "{}", v),
			OptionValue::String(s) => write!(f, "{}", s),
			OptionValue::List(l) => write!(f, "{}", l.join(",")),
			OptionValue::Json(serde_json::Value::String(s)) => write!(f, "{}", s),
			OptionValue::Json(serde_json::Value::Null) => Ok(()),
			OptionValue::Json(j) => write!(f, "{}", j),
		}
	}
}

fn leading_int(s: &str) -> i64 {
	let s = s.trim_start();
	let (negative, digits) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};
	let end = digits.bytes().take_while(u8::is_ascii_digit).count();
	let magnitude = digits[..end].parse::<i64>().unwrap_or(0);
	if negative { -magnitude } else { magnitude }
}

impl From<bool> for OptionValue {
	fn from(b: bool) -> Self {
		OptionValue::Bool(b)
	}
}

impl From<i64> for OptionValue {
	fn from(i: i64) -> Self {
		OptionValue::Int(i)
	}
}

impl From<i32> for OptionValue {
	fn from(i: i32) -> Self {
		OptionValue::Int(i64::from(i))
	}
}

impl From<f64> for OptionValue {
	fn from(f: f64) -> Self {
		OptionValue::Float(f)
	}
}

impl From<&str> for OptionValue {
	fn from(s: &str) -> Self {
		OptionValue::String(s.to_string())
	}
}

impl From<String> for OptionValue {
	fn from(s: String) -> Self {
		OptionValue::String(s)
	}
}

impl From<Vec<String>> for OptionValue {
	fn from(l: Vec<String>) -> Self {
		OptionValue::List(l)
	}
}

/// Decode a stored option into a blob. Unset or empty storage reads as an empty blob.
pub fn blob_from_json(value: serde_json::Value) -> FpResult<SettingsBlob> {
	match value {
		serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
		v if OptionValue::Json(v.clone()).is_empty() => Ok(SettingsBlob::new()),
		_ => Err(crate::error::Error::Serialization(
			"settings blob is not a JSON object".into(),
		)),
	}
}

pub fn blob_to_json(blob: &SettingsBlob) -> FpResult<serde_json::Value> {
	Ok(serde_json::to_value(blob)?)
}


// vim: ts=4
