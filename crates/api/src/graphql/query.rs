// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::{FieldResult, ID, graphql_object};

use crate::{
    db::models::{Client, Project},
    graphql::handlers,
};

use super::Context;

pub struct Query;

#[graphql_object]
#[graphql(name = "RootQueryType", context = Context)]
impl Query {
    /// Get all the clients
    async fn clients(context: &Context) -> FieldResult<Vec<Client>> {
        handlers::clients::get_clients(context).await
    }

    /// Get a client
    async fn client(context: &Context, id: Option<ID>) -> FieldResult<Option<Client>> {
        handlers::clients::get_client(context, id).await
    }

    /// Get all the projects
    async fn projects(context: &Context) -> FieldResult<Vec<Project>> {
        handlers::projects::get_projects(context).await
    }

    /// Get a project
    async fn project(context: &Context, id: Option<ID>) -> FieldResult<Option<Project>> {
        handlers::projects::get_project(context, id).await
    }
}
