// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::{FieldResult, ID, graphql_object};

use crate::{
    db::models::{Client, Project, ProjectStatus, ProjectStatusUpdate},
    graphql::handlers,
};

use super::Context;

pub struct Mutation;

#[graphql_object]
#[graphql(
    context = Context,
)]
impl Mutation {
    async fn add_client(
        context: &Context,
        name: String,
        email: String,
        phone: String,
    ) -> FieldResult<Client> {
        handlers::clients::add_client(context, name, email, phone).await
    }

    /// Deletes the client and every project that belongs to it.
    async fn delete_client(context: &Context, id: ID) -> FieldResult<Option<Client>> {
        handlers::clients::delete_client(context, id).await
    }

    /// A missing or null `status` stores the project as `Not Started`.
    async fn add_project(
        context: &Context,
        name: String,
        description: String,
        status: Option<ProjectStatus>,
        client_id: ID,
    ) -> FieldResult<Project> {
        handlers::projects::add_project(context, name, description, status, client_id).await
    }

    async fn delete_project(context: &Context, id: ID) -> FieldResult<Option<Project>> {
        handlers::projects::delete_project(context, id).await
    }

    /// Only the supplied fields are changed. Returns null if the project does not exist.
    async fn update_project(
        context: &Context,
        id: ID,
        name: Option<String>,
        description: Option<String>,
        status: Option<ProjectStatusUpdate>,
    ) -> FieldResult<Option<Project>> {
        handlers::projects::update_project(context, id, name, description, status).await
    }
}
