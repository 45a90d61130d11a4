#![deny(clippy::all)]

/**
 * single-spa scoped styles - command line
 *
 * Scopes CSS files on disk with the `single-spa-scoped` library.
 */
pub use single_spa_scoped as scoped;

pub mod compile;
pub mod config;
pub mod logging;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
