//! Module exposing build information constants.
//!
//! These values are populated by the build script:
//! - `GIT_HASH`: Git commit hash
//! - `BUILD_TIME_UTC`: Build timestamp in RFC3339 format
//! - `RUSTC_VERSION`: Rustc version used to build the crate

/// Git commit hash of the build, or "unknown" if not available.
pub const GIT_HASH: &str = env!("DBMODEL_GIT_HASH");

/// Build timestamp in RFC3339 format.
pub const BUILD_TIME_UTC: &str = env!("DBMODEL_BUILD_TIME_UTC");

/// Rustc version used for the build.
pub const RUSTC_VERSION: &str = env!("DBMODEL_RUSTC_VERSION");

/// One-line build summary, as printed by `schema-tool version`.
pub fn summary() -> String {
    format!(
        "{} {} (git {}, built {}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        GIT_HASH,
        BUILD_TIME_UTC,
        RUSTC_VERSION
    )
}
