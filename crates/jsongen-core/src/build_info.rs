//! Version metadata embedded by the build script.

/// Short git commit hash, or `unknown` outside a checkout.
pub const GIT_HASH: &str = env!("JSONGEN_GIT_HASH");

/// Cargo profile the binary was built with.
pub const BUILD_PROFILE: &str = env!("JSONGEN_BUILD_PROFILE");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `"<version> (<hash>, <profile>)"`, shown by `jsongen --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("JSONGEN_GIT_HASH"),
    ", ",
    env!("JSONGEN_BUILD_PROFILE"),
    ")"
);
