// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod document;
mod ids;
mod recipes;
mod tags;
pub(crate) mod types;
mod validate;

#[cfg(test)]
pub use document::MemoryDocumentStore;
pub use document::{DocumentStore, FileDocumentStore};
pub use recipes::RecipeService;
pub use tags::TagService;
pub use types::{Recipe, StoreError, Tag};
