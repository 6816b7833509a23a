// SPDX-FileCopyrightText: Copyright (C) 2024-2026 MelodyHub contributors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::{filters::BoxedFilter, http::StatusCode, reject, Filter, Rejection, Reply};

use melodyhub_core::{entity::UserUid, project::ProjectUid};
use melodyhub_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;
use melodyhub_suno_client as suno;

use crate::api::{self, generation, project, reject_on_error, SuccessResponseBody};

/// Identity of the authenticated user, verified and attached by the
/// upstream gateway.
const USER_ID_HEADER: &str = "x-melodyhub-user";

fn authenticated_user() -> impl Filter<Extract = (UserUid,), Error = Rejection> + Clone {
    warp::header::optional::<String>(USER_ID_HEADER).and_then(
        |header: Option<String>| async move {
            header
                .as_deref()
                .and_then(|value| value.parse::<UserUid>().ok())
                .ok_or_else(|| reject::custom(api::Error::Unauthenticated))
        },
    )
}

pub(crate) fn create_filters(
    shared_connection_gatekeeper: Arc<Gatekeeper>,
    generation_client: Arc<suno::Client>,
) -> BoxedFilter<(impl Reply,)> {
    let shared_connection_gatekeeper =
        warp::any().map(move || Arc::clone(&shared_connection_gatekeeper));
    let generation_client = warp::any().map(move || Arc::clone(&generation_client));

    log::info!("Creating API routes");

    let path_param_project_uid = warp::path::param::<ProjectUid>();

    let projects_path = warp::path("p");

    // Projects
    let projects_create = warp::post()
        .and(projects_path)
        .and(warp::path::end())
        .and(authenticated_user())
        .and(warp::body::json())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |created_by,
                  request_body,
                  shared_connection_gatekeeper: Arc<Gatekeeper>| async move {
                api::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection, _abort_flag| {
                        project::handle_create(&mut pooled_connection, created_by, request_body)
                    },
                )
                .await
                .map(|response_data| {
                    warp::reply::with_status(
                        warp::reply::json(&SuccessResponseBody::new(response_data)),
                        StatusCode::CREATED,
                    )
                })
            },
        );

    let projects_load = warp::get()
        .and(projects_path)
        .and(path_param_project_uid)
        .and(warp::path::end())
        .and(authenticated_user())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |uid, user, shared_connection_gatekeeper: Arc<Gatekeeper>| async move {
                api::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection, _abort_flag| {
                        project::handle_load(&mut pooled_connection, user, uid)
                    },
                )
                .await
                .map(|response_data| warp::reply::json(&SuccessResponseBody::new(response_data)))
            },
        );

    // Backing-track generation workflow: one database hop to authorize
    // and resolve the backing track, the upstream generation call with
    // bounded status polling, then a final database hop to persist the
    // new timeline item. No database connection is held while waiting
    // for the generation service.
    let projects_generate = warp::post()
        .and(projects_path)
        .and(path_param_project_uid)
        .and(warp::path("generate"))
        .and(warp::path::end())
        .and(authenticated_user())
        .and(warp::body::json())
        .and(shared_connection_gatekeeper.clone())
        .and(generation_client.clone())
        .and_then(
            move |uid,
                  user: UserUid,
                  request_body,
                  shared_connection_gatekeeper: Arc<Gatekeeper>,
                  generation_client: Arc<suno::Client>| async move {
                // Detached task: once the generation has started the
                // workflow runs to completion or timeout even if the
                // caller disconnects in the meantime.
                let workflow = tokio::spawn(async move {
                    let prepared = api::spawn_blocking_write_task(
                        &shared_connection_gatekeeper,
                        move |mut pooled_connection, _abort_flag| {
                            generation::handle_prepare(
                                &mut pooled_connection,
                                user,
                                uid,
                                request_body,
                            )
                        },
                    )
                    .await?;
                    let generation::PreparedGeneration {
                        track_id,
                        prompt,
                        duration_secs,
                        prompt_params,
                    } = prepared;
                    let generation_id = generation_client
                        .start_generation(&prompt, duration_secs)
                        .await
                        .map_err(reject_on_error)?;
                    let generated = generation_client
                        .await_completion(&generation_id)
                        .await
                        .map_err(reject_on_error)?;
                    let response_data = api::spawn_blocking_write_task(
                        &shared_connection_gatekeeper,
                        move |mut pooled_connection, _abort_flag| {
                            generation::handle_persist(
                                &mut pooled_connection,
                                user,
                                track_id,
                                prompt_params,
                                generated,
                            )
                        },
                    )
                    .await?;
                    Ok::<_, Rejection>(warp::reply::with_status(
                        warp::reply::json(&SuccessResponseBody::new(response_data)),
                        StatusCode::CREATED,
                    ))
                });
                workflow
                    .await
                    .map_err(|err| reject_on_error(api::Error::Other(err.into())))?
            },
        );

    projects_create
        .or(projects_load)
        .or(projects_generate)
        .boxed()
}
