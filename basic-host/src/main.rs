//! Example host for the landing page service
//!
//! Usage:
//!   frontpage-basic-host page [TAB]        print the settings page
//!   frontpage-basic-host save QUERY        save `key=value&...` as submitted from the login status tab
//!   frontpage-basic-host resolve [MODE] [PAGE]
//!
//! `FRONT_PAGE_DATA_DIR` holds the option files and an optional `pages.json`
//! catalog; `FRONT_PAGE_CONFIG` points to an optional engine config file.

use std::{env, path, process::ExitCode, sync::Arc};

use async_trait::async_trait;

use frontpage::{FrontPage, ShowOnFront};
use frontpage_core::EngineConfig;
use frontpage_option_store_fs::OptionStoreFs;
use frontpage_types::content_catalog::{ContentCatalog, PageRef};
use frontpage_types::prelude::*;

pub struct Config {
	pub data_dir: path::PathBuf,
	pub engine_config: Option<path::PathBuf>,
}

/// Page catalog read from `pages.json`, a list of `{ "id", "title" }`
#[derive(Debug)]
struct JsonPageCatalog {
	path: path::PathBuf,
}

#[async_trait]
impl ContentCatalog for JsonPageCatalog {
	async fn list_pages(&self) -> FpResult<Vec<PageRef>> {
		match tokio::fs::read(&self.path).await {
			Ok(data) => Ok(serde_json::from_slice(&data)?),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
			Err(err) => Err(err.into()),
		}
	}
}

fn print_json(value: &impl serde::Serialize) -> FpResult<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

async fn run(config: Config, args: &[String]) -> FpResult<()> {
	let engine_config = match &config.engine_config {
		Some(path) => EngineConfig::from_json_file(path)?,
		None => EngineConfig::default(),
	};
	let store = OptionStoreFs::new(config.data_dir.clone().into_boxed_path()).await?;
	let catalog = JsonPageCatalog { path: config.data_dir.join("pages.json") };
	let engine = frontpage::engine_builder(engine_config)?.build()?;
	let fp = FrontPage::new(engine, Arc::new(store), Arc::new(catalog));

	match args.first().map(String::as_str) {
		Some("page") | None => print_json(&fp.settings_page(args.get(1).map(String::as_str)).await?),
		Some("save") => {
			let query = args.get(1).map_or("", String::as_str);
			let pairs: Vec<(String, String)> =
				serde_urlencoded::from_str(query).map_err(|err| Error::ValidationError(err.to_string()))?;
			let input = pairs.into_iter().map(|(key, value)| (key, OptionValue::from(value))).collect();
			let referer = format!("options.php?tab={}", frontpage::settings::LOGIN_STATUS_PAGES_TAB);
			let outcome = fp.save(input, Some(&referer)).await?;
			if let Some(notice) = &outcome.notice {
				info!("{}: {}", notice.code, notice.message);
			}
			print_json(&outcome.blob)
		}
		Some("resolve") => {
			let mode: ShowOnFront = args.get(1).map_or("posts", String::as_str).parse()?;
			let page = args.get(2).cloned().unwrap_or_default();
			let mut resolved = serde_json::Map::new();
			for (state, auth) in [("loggedIn", true), ("loggedOut", false)] {
				let show = fp.show_on_front(mode, &auth).await?;
				let page = fp.page_on_front(page.as_str(), &auth).await?;
				resolved.insert(state.into(), serde_json::json!({ "showOnFront": show, "pageOnFront": page }));
			}
			print_json(&resolved)
		}
		Some(other) => Err(Error::ValidationError(format!("unknown command '{}'", other))),
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

	let config = Config {
		data_dir: path::PathBuf::from(env::var("FRONT_PAGE_DATA_DIR").unwrap_or_else(|_| "./data".to_string())),
		engine_config: env::var_os("FRONT_PAGE_CONFIG").map(path::PathBuf::from),
	};
	let args: Vec<String> = env::args().skip(1).collect();

	match run(config, &args).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
