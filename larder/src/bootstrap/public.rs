// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action, write_new_file};
use crate::runtime_paths::RuntimePaths;

pub(crate) const DEFAULT_INDEX_HTML: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bootstrap/assets/index.html"
));

pub(crate) const DEFAULT_SCRIPT_JS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bootstrap/assets/script.js"
));

pub(crate) const DEFAULT_STYLE_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bootstrap/assets/style.css"
));

/// Seeds the bundled frontend into the public directory. Files the user has
/// edited or replaced are never overwritten.
pub fn ensure_public_assets(runtime_paths: &RuntimePaths) -> Result<bool, BootstrapError> {
    let assets = [
        ("index.html", DEFAULT_INDEX_HTML),
        ("script.js", DEFAULT_SCRIPT_JS),
        ("style.css", DEFAULT_STYLE_CSS),
    ];

    let mut created_any = false;
    for (name, contents) in assets {
        let path = runtime_paths.public_dir.join(name);
        if write_new_file(&path, contents)? {
            log_action(format!("created {} from embedded frontend", path.display()));
            created_any = true;
        }
    }

    Ok(created_any)
}
