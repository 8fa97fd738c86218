// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action, write_new_file};
use crate::runtime_paths::RuntimePaths;
use std::path::Path;

const EMPTY_COLLECTION: &str = "[]";

/// Seeds the two document files as empty collections. Existing documents are
/// left exactly as they are.
pub fn ensure_data_files(runtime_paths: &RuntimePaths) -> Result<bool, BootstrapError> {
    let created_recipes = ensure_collection_file(&runtime_paths.recipes_file)?;
    let created_tags = ensure_collection_file(&runtime_paths.tags_file)?;
    Ok(created_recipes || created_tags)
}

fn ensure_collection_file(path: &Path) -> Result<bool, BootstrapError> {
    if write_new_file(path, EMPTY_COLLECTION)? {
        log_action(format!("created {}", path.display()));
        return Ok(true);
    }
    Ok(false)
}
