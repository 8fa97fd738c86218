// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::config::ValidatedConfig;
use crate::runtime_paths::RuntimePaths;
use crate::store::{FileDocumentStore, Recipe, RecipeService, StoreError, Tag, TagService};

pub struct AppState {
    pub app_name: String,
    pub app_description: String,
    pub recipes: RecipeService,
    pub tags: Arc<TagService>,
    pub runtime_paths: RuntimePaths,
}

impl AppState {
    pub fn new(config: &ValidatedConfig, runtime_paths: RuntimePaths) -> Result<Self, StoreError> {
        let tag_store = FileDocumentStore::<Tag>::new(
            runtime_paths.tags_file.clone(),
            config.data.pretty,
        )?;
        let tags = Arc::new(TagService::new(Arc::new(tag_store)));

        let recipe_store = FileDocumentStore::<Recipe>::new(
            runtime_paths.recipes_file.clone(),
            config.data.pretty,
        )?;
        let recipes = RecipeService::new(Arc::new(recipe_store), tags.clone());

        Ok(Self {
            app_name: config.app.name.clone(),
            app_description: config.app.description.clone(),
            recipes,
            tags,
            runtime_paths,
        })
    }
}

#[cfg(test)]
impl AppState {
    pub fn new_for_tests(
        app_name: &str,
        runtime_paths: RuntimePaths,
        recipes: Vec<Recipe>,
        tags: Vec<Tag>,
    ) -> Self {
        use crate::store::MemoryDocumentStore;

        let tag_service = Arc::new(TagService::new(Arc::new(MemoryDocumentStore::new(tags))));
        let recipe_service = RecipeService::new(
            Arc::new(MemoryDocumentStore::new(recipes)),
            tag_service.clone(),
        );

        Self {
            app_name: app_name.to_string(),
            app_description: "A personal recipe collection API".to_string(),
            recipes: recipe_service,
            tags: tag_service,
            runtime_paths,
        }
    }
}
