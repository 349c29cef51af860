// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use super::{
    Store, StoreError,
    models::{Client, NewClient, NewProject, Project, ProjectChanges},
};

/// Process-local store, used when no database is configured.
///
/// `delete_client` is not atomic here: a concurrent `insert_project` for the
/// same client can land between the two removals.
#[derive(Default)]
pub struct MemoryStore {
    clients: DashMap<Uuid, Client>,
    projects: DashMap<Uuid, Project>,
}

fn sorted<T: Clone>(
    map: &DashMap<Uuid, T>,
    key: impl Fn(&T) -> (DateTime<Utc>, Uuid),
) -> Vec<T> {
    let mut records: Vec<T> = map.iter().map(|entry| entry.value().clone()).collect();
    records.sort_by_key(key);
    records
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(sorted(&self.clients, |c| (c.created_at, c.id)))
    }

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, StoreError> {
        Ok(self.clients.get(&id).map(|c| c.clone()))
    }

    async fn insert_client(&self, client: NewClient) -> Result<Client, StoreError> {
        let record = Client {
            id: Uuid::now_v7(),
            name: client.name,
            email: client.email,
            phone: client.phone,
            created_at: Utc::now(),
        };
        self.clients.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>, StoreError> {
        self.projects.retain(|_, project| project.client_id != id);
        Ok(self.clients.remove(&id).map(|(_, client)| client))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(sorted(&self.projects, |p| (p.created_at, p.id)))
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.get(&id).map(|p| p.clone()))
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let record = Project {
            id: Uuid::now_v7(),
            name: project.name,
            description: project.description,
            status: project.status,
            client_id: project.client_id,
            created_at: Utc::now(),
        };
        self.projects.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_project(
        &self,
        id: Uuid,
        changes: ProjectChanges,
    ) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.get_mut(&id).map(|mut project| {
            changes.apply_to(&mut project);
            project.clone()
        }))
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.remove(&id).map(|(_, project)| project))
    }
}
