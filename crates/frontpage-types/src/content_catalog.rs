//! Adapter for the host's content repository

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// A page the landing view can be redirected to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
	pub id: i64,
	pub title: String,
}

#[async_trait]
pub trait ContentCatalog: Debug + Send + Sync {
	/// Lists the pages available as landing pages, in display order
	async fn list_pages(&self) -> FpResult<Vec<PageRef>>;
}

// vim: ts=4
