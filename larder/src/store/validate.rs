// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{StoreError, Tag};
use serde_json::Value;
use std::collections::HashSet;

pub(crate) const DISH_NAME_REQUIRED: &str = "The name of the dish is required.";
pub(crate) const INGREDIENTS_REQUIRED: &str = "The ingredients are required.";
pub(crate) const RATING_OUT_OF_RANGE: &str = "The rating must be between 1 and 10.";
pub(crate) const TAGS_REQUIRED: &str = "Tags are required.";

/// The normalized output of a successful recipe validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecipe {
    pub dish_name: String,
    pub ingredients: String,
    pub tags: Vec<String>,
    pub rating: u8,
}

/// Validates a raw recipe payload against the known tag taxonomy. All checks
/// run before erroring, so the caller receives every problem at once rather
/// than the first one hit. On success the returned record carries the trimmed
/// dish name, the lowercased re-joined ingredients, the deduplicated
/// lowercase tag list and the rating as an integer.
pub fn validate_recipe_input(input: &Value, known_tags: &[Tag]) -> Result<CleanRecipe, StoreError> {
    let mut errors = Vec::new();

    let dish_name = text_field(input.get("dishName"));
    if dish_name.is_empty() {
        errors.push(DISH_NAME_REQUIRED.to_string());
    }

    let ingredients_raw = text_field(input.get("ingredients"));
    if ingredients_raw.is_empty() {
        errors.push(INGREDIENTS_REQUIRED.to_string());
    }

    let rating = parse_rating(input.get("rating"));
    if rating.is_none() {
        errors.push(RATING_OUT_OF_RANGE.to_string());
    }

    let tags = tag_candidates(input.get("tags"));
    if tags.is_empty() {
        errors.push(TAGS_REQUIRED.to_string());
    } else {
        let missing = missing_tags(&tags, known_tags);
        if !missing.is_empty() {
            errors.push(unknown_tags_message(&missing));
        }
    }

    match (rating, errors.is_empty()) {
        (Some(rating), true) => Ok(CleanRecipe {
            dish_name,
            ingredients: normalize_ingredients(&ingredients_raw),
            tags,
            rating,
        }),
        _ => Err(StoreError::Validation(errors)),
    }
}

/// Validated changes extracted from a partial update payload. Only fields
/// present in the patch are populated; absent fields stay `None` and the
/// stored values survive the merge.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct RecipeChanges {
    pub(crate) dish_name: Option<String>,
    pub(crate) ingredients: Option<String>,
    pub(crate) tags: Option<Vec<String>>,
    pub(crate) rating: Option<u8>,
}

/// Validates a partial update. Each present field is held to the same rule
/// the creation pipeline applies to it; failures accumulate the same way.
/// Fields the patch does not mention are neither required nor touched.
pub(crate) fn validate_patch(
    patch: &Value,
    known_tags: &[Tag],
) -> Result<RecipeChanges, StoreError> {
    let mut errors = Vec::new();
    let mut changes = RecipeChanges::default();

    if patch.get("dishName").is_some() {
        let dish_name = text_field(patch.get("dishName"));
        if dish_name.is_empty() {
            errors.push(DISH_NAME_REQUIRED.to_string());
        } else {
            changes.dish_name = Some(dish_name);
        }
    }

    if patch.get("ingredients").is_some() {
        let ingredients_raw = text_field(patch.get("ingredients"));
        if ingredients_raw.is_empty() {
            errors.push(INGREDIENTS_REQUIRED.to_string());
        } else {
            changes.ingredients = Some(normalize_ingredients(&ingredients_raw));
        }
    }

    if patch.get("rating").is_some() {
        match parse_rating(patch.get("rating")) {
            Some(rating) => changes.rating = Some(rating),
            None => errors.push(RATING_OUT_OF_RANGE.to_string()),
        }
    }

    if patch.get("tags").is_some() {
        let candidates = tag_candidates(patch.get("tags"));
        if candidates.is_empty() {
            errors.push(TAGS_REQUIRED.to_string());
        } else {
            let missing = missing_tags(&candidates, known_tags);
            if missing.is_empty() {
                changes.tags = Some(candidates);
            } else {
                errors.push(unknown_tags_message(&missing));
            }
        }
    }

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(StoreError::Validation(errors))
    }
}

pub(crate) fn unknown_tags_message(missing: &[String]) -> String {
    format!("These tags do not exist: {}", missing.join(", "))
}

/// Stringifies a free-text field the way the API accepts it: strings are
/// trimmed, numbers are rendered, anything else counts as absent.
pub(crate) fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Accepts the rating as a JSON number or a numeric string. Only finite
/// whole numbers between 1 and 10 inclusive qualify.
pub(crate) fn parse_rating(value: Option<&Value>) -> Option<u8> {
    let number = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    if number.is_finite() && number.fract() == 0.0 && (1.0..=10.0).contains(&number) {
        Some(number as u8)
    } else {
        None
    }
}

/// Normalizes the tags field into candidate names: a comma-separated string
/// or an array of strings/numbers, each token trimmed and lowercased, empty
/// tokens dropped, duplicates removed keeping first-seen order.
pub(crate) fn tag_candidates(value: Option<&Value>) -> Vec<String> {
    let raw_tokens: Vec<String> = match value {
        Some(Value::String(text)) => text.split(',').map(|token| token.to_string()).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for token in raw_tokens {
        let normalized = token.trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        if seen.insert(normalized.clone()) {
            candidates.push(normalized);
        }
    }
    candidates
}

pub(crate) fn missing_tags(candidates: &[String], known_tags: &[Tag]) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| !known_tags.iter().any(|tag| &tag.name == *candidate))
        .cloned()
        .collect()
}

pub(crate) fn normalize_ingredients(raw: &str) -> String {
    raw.to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
