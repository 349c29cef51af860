// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::{FieldResult, ID, graphql_object};

use crate::{
    db::models::{Client, NewProject, Project, ProjectChanges, ProjectStatus, ProjectStatusUpdate},
    graphql::{Context, parse_id},
};

#[graphql_object]
#[graphql(context = Context)]
impl Project {
    pub fn id(&self) -> ID {
        ID::from(self.id.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// One of `Not Started`, `In Progress` or `Completed`.
    pub fn status(&self) -> &str {
        self.status.label()
    }

    /// Null when the owning client no longer exists.
    pub async fn client(&self, ctx: &Context) -> FieldResult<Option<Client>> {
        Ok(ctx.store().find_client(self.client_id).await?)
    }
}

pub async fn get_projects(ctx: &Context) -> FieldResult<Vec<Project>> {
    Ok(ctx.store().list_projects().await?)
}

pub async fn get_project(ctx: &Context, id: Option<ID>) -> FieldResult<Option<Project>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let project_id = parse_id(&id)?;
    Ok(ctx.store().find_project(project_id).await?)
}

pub async fn add_project(
    ctx: &Context,
    name: String,
    description: String,
    status: Option<ProjectStatus>,
    client_id: ID,
) -> FieldResult<Project> {
    let new_project = NewProject {
        name,
        description,
        status: status.unwrap_or(ProjectStatus::NotStarted),
        client_id: parse_id(&client_id)?,
    };
    let project = ctx.store().insert_project(new_project).await?;

    tracing::info!(
        project_id = %project.id,
        client_id = %project.client_id,
        ip = %ctx.get_ip(),
        "Added project"
    );
    Ok(project)
}

pub async fn delete_project(ctx: &Context, id: ID) -> FieldResult<Option<Project>> {
    let project_id = parse_id(&id)?;
    let deleted = ctx.store().delete_project(project_id).await?;

    if deleted.is_some() {
        tracing::info!(%project_id, ip = %ctx.get_ip(), "Deleted project");
    }
    Ok(deleted)
}

pub async fn update_project(
    ctx: &Context,
    id: ID,
    name: Option<String>,
    description: Option<String>,
    status: Option<ProjectStatusUpdate>,
) -> FieldResult<Option<Project>> {
    let project_id = parse_id(&id)?;
    let changes = ProjectChanges {
        name,
        description,
        status: status.map(ProjectStatus::from),
    };
    let updated = ctx.store().update_project(project_id, changes).await?;

    if updated.is_some() {
        tracing::info!(%project_id, ip = %ctx.get_ip(), "Updated project");
    }
    Ok(updated)
}
