//! # File I/O Module
//!
//! Loads and saves [`EngineSettings`] with the same safety rules as any other
//! file the tools write:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Version validation**: refuse files from an incompatible schema
//!
//! ## File Format
//!
//! The extension picks the format: `.toml` is TOML, anything else is JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use shade_core::file_io::{load_settings, save_settings};
//! use shade_core::settings::EngineSettings;
//! use std::path::Path;
//!
//! let settings = EngineSettings::default();
//! save_settings(&settings, Path::new("shade.toml"))?;
//!
//! let loaded = load_settings(Path::new("shade.toml"))?;
//! assert_eq!(loaded.rules, settings.rules);
//! # Ok::<(), shade_core::errors::ShadeError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::{ShadeError, ShadeResult};
use crate::settings::{EngineSettings, SCHEMA_VERSION};

/// On-disk encoding of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    pub fn for_path(path: &Path) -> SettingsFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SettingsFormat::Toml,
            _ => SettingsFormat::Json,
        }
    }

    pub fn encode(&self, settings: &EngineSettings) -> ShadeResult<String> {
        match self {
            SettingsFormat::Json => {
                serde_json::to_string_pretty(settings).map_err(|e| ShadeError::serialization(e.to_string()))
            }
            SettingsFormat::Toml => {
                toml::to_string_pretty(settings).map_err(|e| ShadeError::serialization(e.to_string()))
            }
        }
    }

    pub fn decode(&self, contents: &str) -> ShadeResult<EngineSettings> {
        match self {
            SettingsFormat::Json => {
                serde_json::from_str(contents).map_err(|e| ShadeError::serialization(e.to_string()))
            }
            SettingsFormat::Toml => toml::from_str(contents).map_err(|e| ShadeError::serialization(e.to_string())),
        }
    }
}

/// Save settings with atomic write semantics.
///
/// 1. Serialize in the format the extension asks for
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_settings(settings: &EngineSettings, path: &Path) -> ShadeResult<()> {
    let contents = SettingsFormat::for_path(path).encode(settings)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        ShadeError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        ShadeError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        ShadeError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        ShadeError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

/// Load settings from a JSON or TOML file.
///
/// # Returns
///
/// * `Err(ShadeError::VersionMismatch)` - File schema is incompatible
/// * `Err(ShadeError::SerializationError)` - Malformed contents
/// * `Err(ShadeError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> ShadeResult<EngineSettings> {
    let mut file = File::open(path)
        .map_err(|e| ShadeError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| ShadeError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings = SettingsFormat::for_path(path)
        .decode(&contents)
        .map_err(|e| match e {
            ShadeError::SerializationError { reason } => {
                ShadeError::serialization(format!("Invalid settings in {}: {}", path.display(), reason))
            }
            other => other,
        })?;

    validate_version(&settings.version)?;

    tracing::info!(path = %path.display(), version = %settings.version, "settings loaded");
    Ok(settings)
}

/// Check a file's schema version against [`SCHEMA_VERSION`].
///
/// The major version must match; while in 0.x a newer minor is rejected too.
pub fn validate_version(file_version: &str) -> ShadeResult<()> {
    let mismatch = || ShadeError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
