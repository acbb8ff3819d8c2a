//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and version information.

/// The display name of the application (human-readable).
pub const APP_NAME: &str = "zombies easter egg helper";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "egghelper";

/// Directory name inside the platform config directory.
pub const APP_CONFIG_DIR_NAME: &str = "egghelper";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "EGGHELPER_CONFIG_DIR";
