// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment failures into miette diagnostics.
//!
//! Unknown keys are pointed at in the offending TOML file when it can be
//! located, and come with the closest valid key as a suggestion.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A single problem found while loading or validating configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(frogcrypto::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, when one is close enough.
        suggestion: Option<String>,
        /// Comma-separated keys accepted in the same table.
        valid_keys: String,
        #[label("not a frogcrypto setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(frogcrypto::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path of the value, e.g. `server.port`.
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(frogcrypto::config::missing_key),
        help("add `{key} = <value>` to frogcrypto.toml")
    )]
    MissingKey { key: String },

    /// A value that parsed but breaks a constraint.
    #[error("validation error: {message}")]
    #[diagnostic(code(frogcrypto::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(frogcrypto::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    if let Some(s) = suggestion {
        format!("did you mean `{s}`? Valid keys: {valid_keys}")
    } else {
        format!("valid keys: {valid_keys}")
    }
}

/// Converts every error figment collected into a [`ConfigError`].
///
/// `toml_sources` holds `(path, content)` for each file that was merged, so
/// unknown keys can be labelled in place.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert(&error, toml_sources))
        .collect()
}

fn convert(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let (span, src) = locate(error, field, toml_sources).unzip();
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, expected),
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.to_string(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: error.path.join("."),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.clone(),
            span: None,
            src: None,
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

/// Span and named source for `field` in the file the error came from.
fn locate(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let figment::Source::File(origin) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let origin = origin.display().to_string();
    let (path, content) = toml_sources.iter().find(|(p, _)| *p == origin)?;

    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of `field` inside the table named by `section`.
///
/// Tracks `[table]` headers line by line, so a key with the same name in
/// another table is never matched. An empty `section` means the root table.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let wanted = section.join(".");
    let mut current = String::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(header) = trimmed.strip_prefix('[') {
            current = header
                .split(']')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
        } else if current == wanted {
            let rest = trimmed.strip_prefix(field).map(str::trim_start);
            if rest.is_some_and(|r| r.starts_with('=')) {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len();
    }
    None
}

/// Closest key in `valid_keys` to `unknown`, if any scores above the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Prints each error to stderr with miette's graphical renderer.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str) -> Vec<String> {
        vec![name.to_string()]
    }

    #[test]
    fn suggests_closest_key() {
        assert_eq!(suggest_key("prot", &["host", "port"]), Some("port".into()));
        assert_eq!(
            suggest_key(
                "scorebord_limit",
                &["admin_identities", "scoreboard_limit", "lock_lease_secs"]
            ),
            Some("scoreboard_limit".into())
        );
        assert_eq!(suggest_key("zzzzzz", &["host", "port"]), None);
    }

    #[test]
    fn key_offset_is_scoped_to_its_table() {
        let content = "[logging]\nprot = \"x\"\n[server]\nhost = \"a\"\n  prot = 1\n";
        let o = find_key_offset(content, &section("server"), "prot").unwrap();
        assert_eq!(&content[o..o + 4], "prot");
        assert!(o > content.find("[server]").unwrap());
    }

    #[test]
    fn key_offset_handles_dotted_tables_and_root() {
        let content = "top = 1\n[frogcrypto]\nadmin = []\n[frogcrypto.extra]\nadmin = 2\n";
        let path = vec!["frogcrypto".to_string(), "extra".to_string()];
        let o = find_key_offset(content, &path, "admin").unwrap();
        assert_eq!(o, content.rfind("admin").unwrap());
        assert_eq!(find_key_offset(content, &[], "top"), Some(0));
    }

    #[test]
    fn key_offset_requires_assignment() {
        let content = "[server]\nports = 1\nport_x = 2\n";
        assert_eq!(find_key_offset(content, &section("server"), "port"), None);
        assert_eq!(find_key_offset(content, &section("storage"), "ports"), None);
    }
}
