//! Authentication state of the current visitor

/// Answers whether the visitor of the current request is logged in
pub trait AuthState {
	fn is_authenticated(&self) -> bool;
}

impl AuthState for bool {
	fn is_authenticated(&self) -> bool {
		*self
	}
}

// vim: ts=4
