//! The persisted on/off switch for the effect.
//!
//! The flag is owned by the host application's settings UI; this crate only
//! reads it. Reads go straight to storage each time so a toggle shows up on
//! the very next frame.

use log::debug;
use web_sys::Storage;

/// Storage key holding the flag.
pub const STORAGE_KEY: &str = "particles-enabled";

/// The only stored value that turns the effect off.
pub const DISABLED_VALUE: &str = "false";

/// Source of the particles-enabled flag.
pub trait Settings {
	fn particles_enabled(&self) -> bool;
}

/// Interpret a stored flag value. Anything but the disabled sentinel, including absence, enables.
pub fn is_enabled_value(value: Option<&str>) -> bool {
	value != Some(DISABLED_VALUE)
}

/// Read-through view of `window.localStorage`.
///
/// Storage can be missing or throw (sandboxed iframes, privacy modes); both
/// read as enabled.
pub struct LocalStorageSettings {
	storage: Option<Storage>,
}

impl LocalStorageSettings {
	pub fn new() -> Self {
		let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
		if storage.is_none() {
			debug!("constellation: localStorage unavailable, particles stay enabled");
		}
		Self { storage }
	}
}

impl Default for LocalStorageSettings {
	fn default() -> Self {
		Self::new()
	}
}

impl Settings for LocalStorageSettings {
	fn particles_enabled(&self) -> bool {
		let value = self
			.storage
			.as_ref()
			.and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
		is_enabled_value(value.as_deref())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_literal_false_disables() {
		assert!(!is_enabled_value(Some("false")));
		assert!(is_enabled_value(None));
		assert!(is_enabled_value(Some("true")));
		assert!(is_enabled_value(Some("")));
		assert!(is_enabled_value(Some("FALSE")));
		assert!(is_enabled_value(Some("0")));
	}
}
