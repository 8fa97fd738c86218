// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use std::path::{Component, Path, PathBuf};

/// Serves the frontend entry point when the runtime public directory holds
/// one, and falls back to the API welcome body otherwise. A fresh bootstrap
/// always seeds an index.html, so the fallback only shows up when the user
/// removed the frontend on purpose.
pub async fn serve_index(state: web::Data<AppState>) -> HttpResponse {
    let index_path = state.runtime_paths.public_dir.join("index.html");
    match tokio::fs::read(&index_path).await {
        Ok(content) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(content),
        Err(_) => welcome_body(&state),
    }
}

/// Serves a static asset from the runtime public directory. The requested
/// path must stay inside that directory; anything with a parent or rooted
/// component is treated as absent.
pub async fn serve_asset(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let requested = path.into_inner();
    let Some(relative) = sanitize_asset_path(&requested) else {
        return not_found_response();
    };

    let asset_path = state.runtime_paths.public_dir.join(&relative);
    let content = match tokio::fs::read(&asset_path).await {
        Ok(content) => content,
        Err(_) => return not_found_response(),
    };

    let mime = mime_guess::from_path(&asset_path).first_or_octet_stream();
    HttpResponse::Ok()
        .content_type(mime.as_ref())
        .body(content)
}

pub async fn not_found() -> HttpResponse {
    not_found_response()
}

fn welcome_body(state: &AppState) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("Welcome to {}!", state.app_name),
        "description": state.app_description,
        "usage": "Use the endpoints to manage recipes and tags.",
        "endpoints": {
            "GET /api/recipes": "List all recipes",
            "POST /api/recipes": "Create a new recipe",
            "GET /api/recipes/{id}": "Get one recipe by ID",
            "PATCH /api/recipes/{id}": "Update part of a recipe",
            "DELETE /api/recipes/{id}": "Delete a recipe",
            "GET /api/tags": "List all tags",
            "POST /api/tags": "Create a new tag",
            "DELETE /api/tags/{id}": "Delete a tag",
        }
    }))
}

fn not_found_response() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": { "message": "Route not found." }
    }))
}

/// Normalizes a requested asset path to a relative path with only plain
/// components. Rejects empty paths and anything that could escape the
/// public directory.
fn sanitize_asset_path(requested: &str) -> Option<PathBuf> {
    let trimmed = requested.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            _ => return None,
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}
