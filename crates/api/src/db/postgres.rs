// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;
use diesel_async::{
    AsyncConnection, AsyncPgConnection, RunQueryDsl,
    pooled_connection::{
        AsyncDieselConnectionManager,
        bb8::{Pool, PooledConnection},
    },
    scoped_futures::ScopedFutureExt,
};
use uuid::Uuid;

use super::{
    Store, StoreError,
    models::{Client, NewClient, NewProject, Project, ProjectChanges},
    schema::{clients, projects},
};

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_size: u32) -> Result<Self, StoreError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = Pool::builder().max_size(max_size).build(manager).await?;
        Ok(Self { pool })
    }

    async fn get_db_conn(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, StoreError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let records = clients::table
            .select(Client::as_select())
            .order(clients::seq.asc())
            .load::<Client>(&mut self.get_db_conn().await?)
            .await?;
        Ok(records)
    }

    async fn find_client(&self, client_id: Uuid) -> Result<Option<Client>, StoreError> {
        let record = clients::table
            .find(client_id)
            .select(Client::as_select())
            .first::<Client>(&mut self.get_db_conn().await?)
            .await
            .optional()?;
        Ok(record)
    }

    async fn insert_client(&self, new_client: NewClient) -> Result<Client, StoreError> {
        let inserted = diesel::insert_into(clients::table)
            .values(&new_client)
            .returning(Client::as_returning())
            .get_result(&mut self.get_db_conn().await?)
            .await?;
        Ok(inserted)
    }

    async fn delete_client(&self, client_id: Uuid) -> Result<Option<Client>, StoreError> {
        let mut conn = self.get_db_conn().await?;
        let deleted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let removed_projects =
                        diesel::delete(projects::table.filter(projects::client_id.eq(client_id)))
                            .execute(conn)
                            .await?;
                    tracing::debug!("Removed {removed_projects} projects of client {client_id}");

                    diesel::delete(clients::table.find(client_id))
                        .returning(Client::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await?;
        Ok(deleted)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let records = projects::table
            .select(Project::as_select())
            .order(projects::seq.asc())
            .load::<Project>(&mut self.get_db_conn().await?)
            .await?;
        Ok(records)
    }

    async fn find_project(&self, project_id: Uuid) -> Result<Option<Project>, StoreError> {
        let record = projects::table
            .find(project_id)
            .select(Project::as_select())
            .first::<Project>(&mut self.get_db_conn().await?)
            .await
            .optional()?;
        Ok(record)
    }

    async fn insert_project(&self, new_project: NewProject) -> Result<Project, StoreError> {
        let inserted = diesel::insert_into(projects::table)
            .values(&new_project)
            .returning(Project::as_returning())
            .get_result(&mut self.get_db_conn().await?)
            .await?;
        Ok(inserted)
    }

    async fn update_project(
        &self,
        project_id: Uuid,
        changes: ProjectChanges,
    ) -> Result<Option<Project>, StoreError> {
        // diesel refuses an UPDATE with an empty SET clause
        if changes.is_empty() {
            return self.find_project(project_id).await;
        }

        let updated = diesel::update(projects::table.find(project_id))
            .set(&changes)
            .returning(Project::as_returning())
            .get_result(&mut self.get_db_conn().await?)
            .await
            .optional()?;
        Ok(updated)
    }

    async fn delete_project(&self, project_id: Uuid) -> Result<Option<Project>, StoreError> {
        let deleted = diesel::delete(projects::table.find(project_id))
            .returning(Project::as_returning())
            .get_result(&mut self.get_db_conn().await?)
            .await
            .optional()?;
        Ok(deleted)
    }
}
