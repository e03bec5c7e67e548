pub use frontpage_types::prelude::*;

// vim: ts=4
