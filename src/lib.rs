//! Client-side state slice for the sea-transport `status` REST resource.

pub mod api;
pub mod config;
pub mod status;
pub mod store;

/// Version injected at compile time via SEASTATUS_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("SEASTATUS_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
