// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use larder::api;
use larder::app_state::AppState;
use larder::bootstrap;
use larder::public;
use larder::util::test_fixtures::TestFixtureRoot;
use serde_json::Value;

/// A bootstrapped runtime root plus the app state wired over it, the same
/// way main.rs wires the server. Dropping the harness removes the root.
pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub state: web::Data<AppState>,
}

impl TestHarness {
    pub fn new(prefix: &str) -> Self {
        let fixture = TestFixtureRoot::new_unique(prefix).expect("fixture root");
        let bootstrap =
            bootstrap::bootstrap_runtime(fixture.path()).expect("bootstrap runtime");
        let state = AppState::new(&bootstrap.validated_config, bootstrap.runtime_paths)
            .expect("app state");

        Self {
            fixture,
            state: web::Data::new(state),
        }
    }
}

pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(api::configure)
        .configure(public::configure)
}

/// Consumes a service response into its status code and parsed JSON body.
pub async fn json_body<B: MessageBody>(response: ServiceResponse<B>) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = test::read_body(response).await;
    let json = serde_json::from_slice(&body).expect("JSON response body");
    (status, json)
}
