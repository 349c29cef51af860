// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use juniper::GraphQLEnum;
use uuid::Uuid;

use super::schema::*;

#[derive(diesel_derive_enum::DbEnum, Debug, PartialEq, Eq, Clone, Copy, GraphQLEnum)]
#[ExistingTypePath = "crate::db::schema::sql_types::ProjectStatus"]
pub enum ProjectStatus {
    #[db_rename = "Not Started"]
    #[graphql(name = "new")]
    NotStarted,
    #[db_rename = "In Progress"]
    #[graphql(name = "progress")]
    InProgress,
    #[db_rename = "Completed"]
    #[graphql(name = "completed")]
    Completed,
}

impl ProjectStatus {
    /// The stored, human-readable form exposed as `Project.status`.
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

/// Status to move a project to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, GraphQLEnum)]
#[graphql(name = "ProjectStatusUpdate")]
pub enum ProjectStatusUpdate {
    #[graphql(name = "new")]
    NotStarted,
    #[graphql(name = "progress")]
    InProgress,
    #[graphql(name = "completed")]
    Completed,
}

impl From<ProjectStatusUpdate> for ProjectStatus {
    fn from(value: ProjectStatusUpdate) -> Self {
        match value {
            ProjectStatusUpdate::NotStarted => ProjectStatus::NotStarted,
            ProjectStatusUpdate::InProgress => ProjectStatus::InProgress,
            ProjectStatusUpdate::Completed => ProjectStatus::Completed,
        }
    }
}

/* =========================
 * CLIENTS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = clients)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/* =========================
 * PROJECTS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub client_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = projects)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub client_id: Uuid,
}

/// Partial update of a project. `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = projects)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }

    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            project.description.clone_from(description);
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            id: Uuid::now_v7(),
            name: "Website".to_string(),
            description: "Landing page".to_string(),
            status: ProjectStatus::NotStarted,
            client_id: Uuid::now_v7(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ProjectStatus::NotStarted.label(), "Not Started");
        assert_eq!(ProjectStatus::InProgress.label(), "In Progress");
        assert_eq!(ProjectStatus::Completed.label(), "Completed");
        assert_eq!(
            ProjectStatus::from(ProjectStatusUpdate::InProgress),
            ProjectStatus::InProgress
        );
    }

    #[test]
    fn test_changes_only_touch_supplied_fields() {
        let mut project = sample_project();
        let changes = ProjectChanges {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        };
        assert!(!changes.is_empty());
        changes.apply_to(&mut project);
        assert_eq!(project.name, "Website");
        assert_eq!(project.description, "Landing page");
        assert_eq!(project.status, ProjectStatus::Completed);
    }

    #[test]
    fn test_empty_changes() {
        let mut project = sample_project();
        let before = project.clone();
        let changes = ProjectChanges::default();
        assert!(changes.is_empty());
        changes.apply_to(&mut project);
        assert_eq!(project, before);
    }
}
