// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{Config, ConfigError, ValidatedConfig};
use crate::runtime_paths::RuntimePaths;
use std::error::Error;
use std::fmt;
use std::path::Path;

pub mod config;
pub mod data;
pub mod public;

#[derive(Debug)]
pub struct BootstrapResult {
    pub validated_config: ValidatedConfig,
    pub runtime_paths: RuntimePaths,
    pub created_config: bool,
    pub created_data: bool,
    pub created_public: bool,
}

#[derive(Debug)]
pub enum BootstrapError {
    Config(ConfigError),
    Io(std::io::Error),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Config(err) => write!(f, "{}", err),
            BootstrapError::Io(err) => write!(f, "Bootstrap I/O error: {}", err),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BootstrapError::Config(err) => Some(err),
            BootstrapError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Config(err)
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

/// Prepares the runtime root before the server starts: seeds a default
/// config.yaml when missing, validates the configuration, resolves the
/// runtime layout and seeds the document files and the bundled frontend.
/// Safe to run on every start; existing files are never overwritten.
pub fn bootstrap_runtime(root: &Path) -> Result<BootstrapResult, BootstrapError> {
    let created_config = config::ensure_config(root)?;

    let validated_config = Config::load_and_validate(root).map_err(BootstrapError::Config)?;

    let runtime_paths = RuntimePaths::from_root(root)?;

    let created_data = data::ensure_data_files(&runtime_paths)?;
    let created_public = public::ensure_public_assets(&runtime_paths)?;

    Ok(BootstrapResult {
        validated_config,
        runtime_paths,
        created_config,
        created_data,
        created_public,
    })
}

pub(crate) fn log_action(message: impl AsRef<str>) {
    eprintln!("[bootstrap] {}", message.as_ref());
}

pub(crate) fn write_new_file(path: &Path, contents: &str) -> Result<bool, BootstrapError> {
    use std::fs::OpenOptions;
    use std::io::Write;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(true)
}
