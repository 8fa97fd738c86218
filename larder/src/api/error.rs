// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::store::StoreError;
use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

/// Translates a store failure into the wire error shape. This is the only
/// place where error kinds become status codes; the services never see HTTP.
pub(crate) fn error_response(error: &StoreError) -> HttpResponse {
    match error {
        StoreError::Validation(messages) => HttpResponse::BadRequest().json(json!({
            "error": {
                "message": "Validation failed.",
                "details": messages,
            }
        })),
        StoreError::NotFound(message) => HttpResponse::NotFound().json(json!({
            "error": { "message": message }
        })),
        StoreError::Conflict(message) => HttpResponse::Conflict().json(json!({
            "error": { "message": message }
        })),
        StoreError::Storage(message) => {
            log::error!("Storage failure: {}", message);
            HttpResponse::InternalServerError().json(json!({
                "error": { "message": message }
            }))
        }
    }
}

/// Renders a failed JSON body extraction in the same error envelope the
/// handlers use, instead of actix's plain-text default.
pub(crate) fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(json!({
        "error": { "message": err.to_string() }
    }));
    actix_web::error::InternalError::from_response(err, response).into()
}
