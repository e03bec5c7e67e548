//! Filesystem option store
//!
//! Each option is a JSON document in `<base_dir>/<key>.json`. Writes go to a
//! temporary file in the same directory and are renamed over the target.

use std::{
	fmt::Debug,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::{
	fs::{File, create_dir_all, read, remove_file, rename},
	io::AsyncWriteExt,
};

use frontpage_types::{option_store::OptionStore, prelude::*};

/// Option keys become file names, so only a conservative character set is allowed
fn validate_key(key: &str) -> FpResult<()> {
	let valid = !key.is_empty()
		&& !key.starts_with('.')
		&& key.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));
	if valid { Ok(()) } else { Err(Error::ValidationError(format!("invalid option key '{}'", key))) }
}

#[derive(Debug)]
pub struct OptionStoreFs {
	base_dir: Box<Path>,
	tmp_seq: AtomicU64,
}

impl OptionStoreFs {
	pub async fn new(base_dir: Box<Path>) -> FpResult<Self> {
		create_dir_all(&base_dir).await?;
		Ok(Self { base_dir, tmp_seq: AtomicU64::new(0) })
	}

	fn option_path(&self, key: &str) -> FpResult<PathBuf> {
		validate_key(key)?;
		Ok(self.base_dir.join(format!("{}.json", key)))
	}

	fn tmp_path(&self, key: &str) -> PathBuf {
		let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
		self.base_dir.join(format!(".{}.tmp-{}-{}", key, std::process::id(), seq))
	}
}

#[async_trait]
impl OptionStore for OptionStoreFs {
	async fn read_option(&self, key: &str) -> FpResult<Option<serde_json::Value>> {
		let path = self.option_path(key)?;
		let data = match read(&path).await {
			Ok(data) => data,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(err.into()),
		};
		Ok(Some(serde_json::from_slice(&data)?))
	}

	async fn update_option(&self, key: &str, value: serde_json::Value) -> FpResult<()> {
		let path = self.option_path(key)?;
		let data = serde_json::to_vec_pretty(&value)?;
		let tmp_path = self.tmp_path(key);
		debug!("update_option: {:?}", &path);

		let res = async {
			let mut file = File::create(&tmp_path).await?;
			file.write_all(&data).await?;
			file.sync_all().await?;
			rename(&tmp_path, &path).await?;
			Ok::<(), Error>(())
		}
		.await;
		if res.is_err() {
			warn!("update_option failed, removing tmpfile: {:?}", &tmp_path);
			let _ = remove_file(&tmp_path).await;
		}
		res
	}
}


// vim: ts=4
