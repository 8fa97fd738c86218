// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub recipes_file: PathBuf,
    pub tags_file: PathBuf,
    pub public_dir: PathBuf,
}

impl RuntimePaths {
    /// Resolves and checks the runtime layout under the given root. The root
    /// and its directories are created when missing and probed for
    /// writability; the document files themselves may not exist yet at this
    /// point.
    pub fn from_root(root: &Path) -> Result<Self, ConfigError> {
        let root_path = if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root.to_path_buf()
        };

        if !root_path.exists() {
            fs::create_dir_all(&root_path).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "Failed to create runtime root '{}': {}",
                    root_path.display(),
                    e
                ))
            })?;
        }

        let root_canonical = root_path.canonicalize().map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to canonicalize runtime root '{}': {}",
                root_path.display(),
                e
            ))
        })?;

        let config_file = root_canonical.join("config.yaml");
        ensure_file_writable(&config_file, "Config file must be writable")?;

        let data_dir = root_canonical.join("data");
        let public_dir = root_canonical.join("public");

        ensure_dir_exists(&data_dir)?;
        ensure_dir_exists(&public_dir)?;

        let data_dir = data_dir.canonicalize().map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to canonicalize data directory '{}': {}",
                data_dir.display(),
                e
            ))
        })?;
        let public_dir = public_dir.canonicalize().map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to canonicalize public directory '{}': {}",
                public_dir.display(),
                e
            ))
        })?;

        let recipes_file = data_dir.join("recipes.json");
        let tags_file = data_dir.join("tags.json");

        Ok(Self {
            root: root_canonical,
            config_file,
            data_dir,
            recipes_file,
            tags_file,
            public_dir,
        })
    }
}

fn ensure_dir_exists(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to create directory '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    ensure_dir_writable(path, "Directory must be writable")?;
    Ok(())
}

fn ensure_dir_writable(path: &Path, context: &str) -> Result<(), ConfigError> {
    if !path.is_dir() {
        return Err(ConfigError::ValidationError(format!(
            "{} (not a directory): {}",
            context,
            path.display()
        )));
    }

    let probe_name = format!(".larder-write-check-{}", Uuid::new_v4());
    let probe_path = path.join(probe_name);

    let probe_result = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe_path);

    match probe_result {
        Ok(_) => {
            if let Err(err) = fs::remove_file(&probe_path) {
                return Err(ConfigError::ValidationError(format!(
                    "{} (unable to clean probe file {}): {}",
                    context,
                    probe_path.display(),
                    err
                )));
            }
            Ok(())
        }
        Err(err) => Err(ConfigError::ValidationError(format!(
            "{} ({}): {}",
            context,
            path.display(),
            err
        ))),
    }
}

fn ensure_file_writable(path: &Path, context: &str) -> Result<(), ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::ValidationError(format!(
            "{} (not a file): {}",
            context,
            path.display()
        )));
    }

    fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|err| {
            ConfigError::ValidationError(format!("{} ({}): {}", context, path.display(), err))
        })
}
