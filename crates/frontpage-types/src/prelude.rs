pub use crate::error::{Error, FpResult};
pub use crate::value::{DEFAULT_SENTINEL, OptionValue, SettingsBlob};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
