//! Dotenv-style value resolution
//!
//! Reads a single `KEY=VALUE` entry out of an optional plain-text file. Only the
//! prefix rule is implemented: no comments, escapes, interpolation or `export`.
//!
//! [`resolve`] is total. A missing file, an unreadable file, a directory in
//! place of a file or a missing key all produce the caller's default.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use turbotea_core::env_file;
//!
//! let name = env_file::resolve(Path::new("."), ".env", "APP_NAME=", "Fallback");
//! println!("{name}");
//! ```

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Dotenv file consulted by the Android build
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Line prefix carrying the application display name
pub const APP_NAME_KEY: &str = "APP_NAME=";

/// Display name used when `.env` does not provide one
pub const DEFAULT_APP_NAME: &str = "Turbo Tea Multi-Tenant";

/// A matched entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 1-based line number in the file
    pub line: usize,
    /// Value after trimming and unquoting
    pub value: String,
}

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSource {
    /// Read from a file
    File {
        /// The env file
        path: PathBuf,
        /// 1-based line number
        line: usize,
    },
    /// The caller's fallback
    Default,
}

/// A resolved value together with its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    /// The effective value
    pub value: String,
    /// Where `value` came from
    pub source: ValueSource,
}

impl ResolvedValue {
    fn fallback(default: &str) -> Self {
        Self {
            value: default.to_string(),
            source: ValueSource::Default,
        }
    }

    /// Whether the value was read from the file
    pub fn from_file(&self) -> bool {
        matches!(self.source, ValueSource::File { .. })
    }
}

/// Strip one layer of matching `"` or `'` quotes
pub fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse one line against `key`
///
/// The line is not trimmed before matching, so indentation prevents a match.
/// The value is the text after the matched prefix. When `key` does not end in
/// `=`, it is the text after the next `=` (or all of it if there is none).
/// The result is trimmed and unquoted once.
pub fn parse_line(line: &str, key: &str) -> Option<String> {
    let rest = line.strip_prefix(key)?;
    let raw = if key.ends_with('=') {
        rest
    } else {
        rest.split_once('=').map_or(rest, |(_, value)| value)
    };
    Some(unquote(raw.trim()).to_string())
}

/// Read a file as lines, decoding invalid UTF-8 lossily
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| Error::from(e).with_context(path.display().to_string()))?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

/// Find the first entry for `key` in `lines`
pub fn find_entry<S: AsRef<str>>(lines: &[S], key: &str) -> Option<Entry> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        parse_line(line.as_ref(), key).map(|value| Entry {
            line: idx + 1,
            value,
        })
    })
}

/// Fallible lookup of `key` in the file at `path`
///
/// `Ok(None)` means the file was read but holds no matching line.
pub fn lookup(path: &Path, key: &str) -> Result<Option<Entry>> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let lines = read_lines(path)?;
    Ok(find_entry(&lines, key))
}

/// Resolve `key` from `base_dir/file_name`, recording the value's origin
pub fn resolve_with_source(base_dir: &Path, file_name: &str, key: &str, default: &str) -> ResolvedValue {
    let path = base_dir.join(file_name);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "env file absent, using default");
        return ResolvedValue::fallback(default);
    }

    match read_lines(&path).map(|lines| find_entry(&lines, key)) {
        Ok(Some(entry)) => {
            tracing::debug!(path = %path.display(), line = entry.line, key, "resolved from env file");
            ResolvedValue {
                value: entry.value,
                source: ValueSource::File {
                    path,
                    line: entry.line,
                },
            }
        }
        Ok(None) => {
            tracing::debug!(path = %path.display(), key, "key not present, using default");
            ResolvedValue::fallback(default)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read env file, using default");
            ResolvedValue::fallback(default)
        }
    }
}

/// Resolve `key` from `base_dir/file_name`, falling back to `default`
pub fn resolve(base_dir: &Path, file_name: &str, key: &str, default: &str) -> String {
    resolve_with_source(base_dir, file_name, key, default).value
}

/// The application display name for the project at `project_root`
pub fn resolve_app_name(project_root: &Path) -> String {
    resolve(project_root, DEFAULT_ENV_FILE, APP_NAME_KEY, DEFAULT_APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn project_with_env(contents: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), contents).unwrap();
        dir
    }

    fn app_name(dir: &TempDir) -> String {
        resolve(dir.path(), ".env", "APP_NAME=", "Default")
    }

    #[test]
    fn test_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(app_name(&dir), "Default");
        assert_eq!(resolve_app_name(dir.path()), "Turbo Tea Multi-Tenant");
    }

    #[test]
    fn test_plain_value_is_trimmed() {
        let dir = project_with_env("APP_NAME=  My App  \n");
        assert_eq!(app_name(&dir), "My App");
    }

    #[test]
    fn test_double_quotes_stripped() {
        let dir = project_with_env("APP_NAME=\"My App\"\n");
        assert_eq!(app_name(&dir), "My App");
    }

    #[test]
    fn test_single_quotes_stripped() {
        let dir = project_with_env("APP_NAME='My App'\n");
        assert_eq!(app_name(&dir), "My App");
    }

    #[test]
    fn test_only_one_quote_layer_stripped() {
        let dir = project_with_env("APP_NAME=\"\"My App\"\"\n");
        assert_eq!(app_name(&dir), "\"My App\"");
    }

    #[test]
    fn test_missing_key_returns_default() {
        let dir = project_with_env("API_URL=https://tea.example\nTENANT=green\n");
        assert_eq!(app_name(&dir), "Default");
    }

    #[test]
    fn test_first_match_wins() {
        let dir = project_with_env("APP_NAME=First\nAPP_NAME=Second\n");
        let resolved = resolve_with_source(dir.path(), ".env", "APP_NAME=", "Default");
        assert_eq!(resolved.value, "First");
        assert_eq!(
            resolved.source,
            ValueSource::File {
                path: dir.path().join(".env"),
                line: 1
            }
        );
    }

    #[test]
    fn test_directory_in_place_of_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".env")).unwrap();
        let resolved = resolve_with_source(dir.path(), ".env", "APP_NAME=", "Default");
        assert_eq!(resolved.value, "Default");
        assert!(!resolved.from_file());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = project_with_env("");
        assert_eq!(app_name(&dir), "Default");
    }

    #[test]
    fn test_indented_key_does_not_match() {
        let dir = project_with_env("  APP_NAME=Indented\n");
        assert_eq!(app_name(&dir), "Default");
    }

    #[test]
    fn test_similar_key_does_not_match() {
        let dir = project_with_env("APP_NAME_SHORT=Tea\nAPP_NAME=Turbo\n");
        let resolved = resolve_with_source(dir.path(), ".env", "APP_NAME=", "Default");
        assert_eq!(resolved.value, "Turbo");
        assert!(matches!(resolved.source, ValueSource::File { line: 2, .. }));
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let dir = project_with_env("APP_NAME=a=b\n");
        assert_eq!(app_name(&dir), "a=b");
    }

    #[test]
    fn test_crlf_line_endings() {
        let dir = project_with_env("TENANT=x\r\nAPP_NAME=\"Windows Tea\"\r\n");
        assert_eq!(app_name(&dir), "Windows Tea");
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), b"JUNK=\xff\xfe\nAPP_NAME=Tea\n").unwrap();
        assert_eq!(app_name(&dir), "Tea");
    }

    #[test]
    fn test_empty_value() {
        let dir = project_with_env("APP_NAME=\n");
        assert_eq!(app_name(&dir), "");
    }

    #[test]
    fn test_unquote_edge_cases() {
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\"abc'"), "\"abc'");
        assert_eq!(unquote("'\"abc\"'"), "\"abc\"");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_parse_line_without_equals() {
        assert_eq!(parse_line("APP_NAME", "APP_NAME"), Some(String::new()));
        assert_eq!(parse_line("APP_NAME='Tea'", "APP_NAME"), Some("Tea".to_string()));
        assert_eq!(parse_line("OTHER=1", "APP_NAME="), None);
    }

    #[test]
    fn test_key_containing_equals_splits_after_prefix() {
        let dir = project_with_env("TENANT=green;APP_NAME=Tea\n");
        let name = resolve(dir.path(), ".env", "TENANT=green;APP_NAME=", "Default");
        assert_eq!(name, "Tea");
        assert_eq!(
            parse_line("TENANT=green;APP_NAME=\"a=b\"", "TENANT=green;APP_NAME="),
            Some("a=b".to_string())
        );
    }

    #[test]
    fn test_resolve_reads_file_once_it_exists() {
        let dir = project_with_env("APP_NAME=Tea\n");
        let resolved = resolve_with_source(dir.path(), ".env", "APP_NAME=", "Default");
        assert!(resolved.from_file());
        assert_eq!(resolved.value, "Tea");
    }

    #[test]
    fn test_lookup_distinguishes_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = lookup(&dir.path().join(".env"), "APP_NAME=").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::FileNotFound);

        let dir = project_with_env("TENANT=green\n");
        assert_eq!(lookup(&dir.path().join(".env"), "APP_NAME=").unwrap(), None);
    }

    #[test]
    fn test_find_entry_reports_line_number() {
        let lines = ["# comment", "TENANT=green", "APP_NAME='Tea'"];
        let entry = find_entry(&lines, "APP_NAME=").unwrap();
        assert_eq!(entry.line, 3);
        assert_eq!(entry.value, "Tea");
    }

    #[test]
    fn test_resolved_value_serializes_source() {
        let value = ResolvedValue::fallback("Tea");
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["source"]["kind"], "default");
    }

    proptest! {
        #[test]
        fn prop_plain_values_round_trip(value in "[A-Za-z0-9]([A-Za-z0-9 =]{0,20}[A-Za-z0-9])?") {
            let dir = project_with_env(&format!("APP_NAME={value}\n"));
            prop_assert_eq!(app_name(&dir), value);
        }

        #[test]
        fn prop_never_fails_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join(".env"), &bytes).unwrap();
            let resolved = resolve_with_source(dir.path(), ".env", "APP_NAME=", "Default");
            if !resolved.from_file() {
                prop_assert_eq!(resolved.value, "Default");
            }
        }

        #[test]
        fn prop_without_key_line_returns_default(lines in prop::collection::vec("[B-Z][A-Z_]{0,8}=[a-z ]{0,10}", 0..8)) {
            let dir = project_with_env(&lines.join("\n"));
            prop_assert_eq!(app_name(&dir), "Default");
        }
    }
}
