// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

mod error;
mod recipes;
mod tags;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_payload_error));
    cfg.service(
        web::scope("/api")
            .route("/recipes", web::get().to(recipes::list_recipes))
            .route("/recipes", web::post().to(recipes::create_recipe))
            .route("/recipes/{id}", web::get().to(recipes::get_recipe))
            .route("/recipes/{id}", web::patch().to(recipes::update_recipe))
            .route("/recipes/{id}", web::delete().to(recipes::delete_recipe))
            .route("/tags", web::get().to(tags::list_tags))
            .route("/tags", web::post().to(tags::create_tag))
            .route("/tags/{id}", web::delete().to(tags::delete_tag)),
    );
}
