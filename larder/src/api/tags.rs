// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::{Value, json};

use super::error::error_response;

pub async fn list_tags(state: web::Data<AppState>) -> HttpResponse {
    match state.tags.list() {
        Ok(tags) => HttpResponse::Ok().json(json!({
            "count": tags.len(),
            "tags": tags,
        })),
        Err(error) => error_response(&error),
    }
}

pub async fn create_tag(state: web::Data<AppState>, payload: web::Json<Value>) -> HttpResponse {
    match state.tags.add(&payload.into_inner()).await {
        Ok(tag) => HttpResponse::Created().json(json!({
            "message": "Tag added",
            "tag": tag,
        })),
        Err(error) => error_response(&error),
    }
}

pub async fn delete_tag(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.tags.delete(&id).await {
        Ok(tag) => HttpResponse::Ok().json(json!({
            "message": "Tag deleted",
            "tag": tag,
        })),
        Err(error) => error_response(&error),
    }
}
