//! Project service
//!
//! Acts as a pass-through between the menu controller and the data
//! layer. The only policy added here is at the boundary: "no such row"
//! and "zero rows affected" become [`Error::ProjectNotFound`], so
//! callers of the service never have to interpret an empty optional or
//! a `false` themselves.

use super::entity::{Project, ProjectDraft, ProjectUpdate};
use super::repository::ProjectRepository;
use crate::domain::categories::{Category, CategoryRepository};
use crate::domain::materials::{Material, MaterialDraft, MaterialRepository};
use crate::domain::steps::{Step, StepRepository};
use crate::error::{Error, Result};
use crate::storage::Database;

pub struct ProjectService {
    db: Database,
}

impl ProjectService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new project and return it with its identifier assigned
    pub async fn add_project(&self, draft: &ProjectDraft) -> Result<Project> {
        ProjectRepository::new(&self.db).insert(draft).await
    }

    /// All project rows without accompanying details
    /// (materials, steps and categories)
    pub async fn fetch_all_projects(&self) -> Result<Vec<Project>> {
        ProjectRepository::new(&self.db).list_all().await
    }

    /// The project with its details loaded. Unlike the data layer, a
    /// missing row is an error here.
    pub async fn fetch_project_by_id(&self, id: i64) -> Result<Project> {
        ProjectRepository::new(&self.db)
            .find_by_id(id)
            .await?
            .ok_or(Error::ProjectNotFound(id))
    }

    /// Replace the scalar fields of an existing project
    pub async fn modify_project_details(&self, update: &ProjectUpdate) -> Result<()> {
        if !ProjectRepository::new(&self.db).update_details(update).await? {
            return Err(Error::ProjectNotFound(update.id));
        }
        Ok(())
    }

    /// Delete a project; its materials, steps, and category relations
    /// are removed by the store's cascade
    pub async fn delete_project(&self, id: i64) -> Result<()> {
        if !ProjectRepository::new(&self.db).delete(id).await? {
            return Err(Error::ProjectNotFound(id));
        }
        Ok(())
    }

    /// Add a material to an existing project
    pub async fn add_material(&self, project_id: i64, draft: &MaterialDraft) -> Result<Material> {
        self.require_project(project_id).await?;
        MaterialRepository::new(&self.db).insert(project_id, draft).await
    }

    /// Append a step to an existing project
    pub async fn add_step(&self, project_id: i64, text: &str) -> Result<Step> {
        self.require_project(project_id).await?;
        StepRepository::new(&self.db).insert(project_id, text).await
    }

    /// All known categories
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        CategoryRepository::new(&self.db).list_all().await
    }

    /// Tag an existing project with a category, creating the category
    /// row if the name is new
    pub async fn add_category_to_project(&self, project_id: i64, name: &str) -> Result<Category> {
        self.require_project(project_id).await?;
        CategoryRepository::new(&self.db).attach(project_id, name).await
    }

    async fn require_project(&self, id: i64) -> Result<()> {
        if !ProjectRepository::new(&self.db).exists(id).await? {
            return Err(Error::ProjectNotFound(id));
        }
        Ok(())
    }
}
