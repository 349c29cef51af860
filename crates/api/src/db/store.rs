// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use uuid::Uuid;

use super::{
    StoreError,
    models::{Client, NewClient, NewProject, Project, ProjectChanges},
};

/// Persistence behind the GraphQL resolvers. Each method is a single store
/// call; `delete_client` is the only one that touches both collections.
///
/// Listing methods return records in insertion order.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;
    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, StoreError>;
    async fn insert_client(&self, client: NewClient) -> Result<Client, StoreError>;
    /// Removes every project owned by `id`, then the client itself. Projects
    /// are removed even when the client does not exist.
    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>, StoreError>;

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;
    async fn insert_project(&self, project: NewProject) -> Result<Project, StoreError>;
    /// Returns the project after the update, or `None` if `id` is unknown.
    async fn update_project(
        &self,
        id: Uuid,
        changes: ProjectChanges,
    ) -> Result<Option<Project>, StoreError>;
    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;
}
