// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::{filters::BoxedFilter, Filter, Reply};

use melodyhub_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;
use melodyhub_suno_client as suno;

pub(crate) fn create_filters(
    shared_connection_gatekeeper: Arc<Gatekeeper>,
    generation_client: Arc<suno::Client>,
    about_json: serde_json::Value,
) -> BoxedFilter<(impl Reply,)> {
    let api_filters = warp::path("api").and(super::api::create_filters(
        shared_connection_gatekeeper,
        generation_client,
    ));

    // GET /about
    let about_filter = warp::get()
        .and(warp::path("about"))
        .and(warp::path::end())
        .map(move || warp::reply::json(&about_json));

    api_filters.or(about_filter).boxed()
}
