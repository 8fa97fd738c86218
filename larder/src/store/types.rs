// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};

/// A recipe record as stored in recipes.json and served over the API.
/// Field names on the wire are camelCase; the documents on disk are the
/// interchange format.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub dish_name: String,
    pub ingredients: String,
    pub tags: Vec<String>,
    pub rating: u8,
    pub added_on: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One entry of the tag taxonomy stored in tags.json. Names are kept
/// trimmed and lowercase; uniqueness is enforced on the normalized name.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub enum StoreError {
    Validation(Vec<String>),
    NotFound(String),
    Conflict(String),
    Storage(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Validation(messages) => {
                write!(f, "Validation failed: {}", messages.join(" "))
            }
            StoreError::NotFound(message) => write!(f, "{}", message),
            StoreError::Conflict(message) => write!(f, "{}", message),
            StoreError::Storage(message) => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}
