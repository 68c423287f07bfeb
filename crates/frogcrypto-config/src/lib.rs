// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the FrogCrypto feed service.
//!
//! Settings come from compiled defaults, then TOML files, then `FROGCRYPTO_*`
//! environment variables. Unknown keys are rejected and reported through
//! miette with a suggested correction.
//!
//! # Usage
//!
//! ```no_run
//! use frogcrypto_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::FrogCryptoConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors are mapped to diagnostics against whichever config files
/// exist, so unknown keys can be shown in place.
pub fn load_and_validate() -> Result<FrogCryptoConfig, Vec<ConfigError>> {
    finish(loader::load_config(), || {
        loader::search_paths().iter().filter_map(read_source).collect()
    })
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<FrogCryptoConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<FrogCryptoConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Render the effective configuration as TOML with the issuer key redacted.
pub fn to_redacted_toml(config: &FrogCryptoConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if shown.frogcrypto.issuer_key_hex.is_some() {
        shown.frogcrypto.issuer_key_hex = Some("<redacted>".to_string());
    }
    toml::to_string_pretty(&shown)
}

fn finish(
    loaded: Result<FrogCryptoConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<FrogCryptoConfig, Vec<ConfigError>> {
    let config = loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

fn read_source(path: impl AsRef<Path>) -> Option<(String, String)> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).ok()?;
    Some((path.display().to_string(), content))
}
