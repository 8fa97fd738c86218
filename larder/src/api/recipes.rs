// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::{Value, json};

use super::error::error_response;

pub async fn list_recipes(state: web::Data<AppState>) -> HttpResponse {
    match state.recipes.list() {
        Ok(recipes) => HttpResponse::Ok().json(json!({
            "count": recipes.len(),
            "recipes": recipes,
        })),
        Err(error) => error_response(&error),
    }
}

pub async fn create_recipe(state: web::Data<AppState>, payload: web::Json<Value>) -> HttpResponse {
    match state.recipes.add(&payload.into_inner()).await {
        Ok(recipe) => HttpResponse::Created().json(json!({
            "message": "Recipe added",
            "recipe": recipe,
        })),
        Err(error) => error_response(&error),
    }
}

pub async fn get_recipe(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.recipes.get(&id) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(error) => error_response(&error),
    }
}

pub async fn update_recipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> HttpResponse {
    let id = path.into_inner();
    match state.recipes.update(&id, &payload.into_inner()).await {
        Ok(recipe) => HttpResponse::Ok().json(json!({
            "message": "Recipe updated",
            "recipe": recipe,
        })),
        Err(error) => error_response(&error),
    }
}

pub async fn delete_recipe(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.recipes.delete(&id).await {
        Ok(recipe) => HttpResponse::Ok().json(json!({
            "message": "Recipe deleted",
            "recipe": recipe,
        })),
        Err(error) => error_response(&error),
    }
}
