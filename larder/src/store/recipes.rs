// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::document::DocumentStore;
use super::ids::generate_id;
use super::tags::TagService;
use super::types::{Recipe, StoreError};
use super::validate::{validate_patch, validate_recipe_input};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

const RECIPE_NOT_FOUND: &str = "Recipe not found.";

/// Manages the recipe collection. Reads go straight to the store; every
/// mutation holds the per-collection lock across its whole
/// read-modify-write cycle.
pub struct RecipeService {
    store: Arc<dyn DocumentStore<Recipe>>,
    tags: Arc<TagService>,
    write_lock: Mutex<()>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn DocumentStore<Recipe>>, tags: Arc<TagService>) -> Self {
        Self {
            store,
            tags,
            write_lock: Mutex::new(()),
        }
    }

    pub fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        self.store.load()
    }

    pub fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        self.store
            .load()?
            .into_iter()
            .find(|recipe| recipe.id == id)
            .ok_or_else(|| StoreError::NotFound(RECIPE_NOT_FOUND.to_string()))
    }

    /// Validates a raw payload against the current tag taxonomy and appends
    /// the normalized record with a fresh id and creation timestamp.
    pub async fn add(&self, payload: &Value) -> Result<Recipe, StoreError> {
        let known_tags = self.tags.list()?;
        let clean = validate_recipe_input(payload, &known_tags)?;

        let _guard = self.write_lock.lock().await;
        let mut recipes = self.store.load()?;
        let recipe = Recipe {
            id: generate_id(),
            dish_name: clean.dish_name,
            ingredients: clean.ingredients,
            tags: clean.tags,
            rating: clean.rating,
            added_on: now_timestamp(),
            updated_at: None,
        };
        recipes.push(recipe.clone());
        self.store.save(&recipes)?;
        Ok(recipe)
    }

    /// Applies a partial update. The id lookup runs first, so an unknown id
    /// reports not-found even when the patch is also invalid. Present fields
    /// are validated field by field before the merge; the updated timestamp
    /// is stamped on every successful merge.
    pub async fn update(&self, id: &str, patch: &Value) -> Result<Recipe, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.store.load()?;
        let index = match recipes.iter().position(|recipe| recipe.id == id) {
            Some(index) => index,
            None => return Err(StoreError::NotFound(RECIPE_NOT_FOUND.to_string())),
        };

        let known_tags = self.tags.list()?;
        let changes = validate_patch(patch, &known_tags)?;

        let recipe = &mut recipes[index];
        if let Some(dish_name) = changes.dish_name {
            recipe.dish_name = dish_name;
        }
        if let Some(ingredients) = changes.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(tags) = changes.tags {
            recipe.tags = tags;
        }
        if let Some(rating) = changes.rating {
            recipe.rating = rating;
        }
        recipe.updated_at = Some(now_timestamp());

        let updated = recipe.clone();
        self.store.save(&recipes)?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<Recipe, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.store.load()?;
        let index = match recipes.iter().position(|recipe| recipe.id == id) {
            Some(index) => index,
            None => return Err(StoreError::NotFound(RECIPE_NOT_FOUND.to_string())),
        };

        let removed = recipes.remove(index);
        self.store.save(&recipes)?;
        Ok(removed)
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
