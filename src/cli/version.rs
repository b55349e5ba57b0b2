//! Version command for the relabs driver.

/// The current version of relabs, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line printed by `--version`.
pub fn version_string() -> String {
    format!("relabs {}", VERSION)
}
