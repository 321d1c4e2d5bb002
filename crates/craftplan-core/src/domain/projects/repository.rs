//! Project data access
//!
//! Every operation runs inside a scoped transaction: any failure rolls
//! back before the error reaches the caller, and callers only ever see
//! the domain error types.

use super::entity::{Project, ProjectDraft, ProjectUpdate};
use crate::domain::{categories, materials, steps};
use crate::error::Result;
use crate::storage::mapper;
use crate::storage::Database;
use sqlx::sqlite::SqliteRow;

fn project_from_row(row: &SqliteRow) -> Result<Project> {
    Ok(Project {
        id: mapper::id_column(row, "project_id")?,
        name: mapper::text_column(row, "project_name")?,
        estimated_hours: mapper::opt_decimal_column(row, "estimated_hours")?,
        actual_hours: mapper::opt_decimal_column(row, "actual_hours")?,
        difficulty: mapper::opt_int_column(row, "difficulty")?,
        notes: mapper::opt_text_column(row, "notes")?,
        materials: Vec::new(),
        steps: Vec::new(),
        categories: Vec::new(),
    })
}

/// Project data access
pub struct ProjectRepository<'a> {
    db: &'a Database,
}

impl<'a> ProjectRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a project row and return the draft with the
    /// store-generated identifier populated.
    pub async fn insert(&self, draft: &ProjectDraft) -> Result<Project> {
        let draft = draft.clone();
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let result = sqlx::query(
                        "INSERT INTO project \
                         (project_name, estimated_hours, actual_hours, difficulty, notes) \
                         VALUES (?, ?, ?, ?, ?)",
                    )
                    .bind(&draft.name)
                    .bind(draft.estimated_hours.as_ref().map(mapper::db_decimal))
                    .bind(draft.actual_hours.as_ref().map(mapper::db_decimal))
                    .bind(draft.difficulty)
                    .bind(&draft.notes)
                    .execute(&mut **tx)
                    .await?;

                    Ok(Project {
                        id: result.last_insert_rowid(),
                        name: draft.name,
                        estimated_hours: draft.estimated_hours,
                        actual_hours: draft.actual_hours,
                        difficulty: draft.difficulty,
                        notes: draft.notes,
                        materials: Vec::new(),
                        steps: Vec::new(),
                        categories: Vec::new(),
                    })
                })
            })
            .await
    }

    /// All projects ordered by name, without nested collections.
    /// The list view is summary-only; use [`find_by_id`] for details.
    ///
    /// [`find_by_id`]: ProjectRepository::find_by_id
    pub async fn list_all(&self) -> Result<Vec<Project>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let rows = sqlx::query("SELECT * FROM project ORDER BY project_name")
                        .fetch_all(&mut **tx)
                        .await?;

                    rows.iter().map(project_from_row).collect()
                })
            })
            .await
    }

    /// The project with the given identifier, with materials, steps, and
    /// categories loaded in the same transaction. `None` when no row
    /// matches; that is a legitimate outcome, not an error.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Project>> {
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let row = sqlx::query("SELECT * FROM project WHERE project_id = ?")
                        .bind(id)
                        .fetch_optional(&mut **tx)
                        .await?;

                    let Some(row) = row else {
                        return Ok(None);
                    };

                    let mut project = project_from_row(&row)?;
                    project.materials = materials::for_project(&mut **tx, id).await?;
                    project.steps = steps::for_project(&mut **tx, id).await?;
                    project.categories = categories::for_project(&mut **tx, id).await?;

                    Ok(Some(project))
                })
            })
            .await
    }

    /// Update all five scalar fields by identifier. Returns whether
    /// exactly one row was affected; `false` means no such identifier
    /// and is left for the caller to interpret.
    pub async fn update_details(&self, update: &ProjectUpdate) -> Result<bool> {
        let update = update.clone();
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let result = sqlx::query(
                        "UPDATE project SET \
                         project_name = ?, \
                         estimated_hours = ?, \
                         actual_hours = ?, \
                         difficulty = ?, \
                         notes = ? \
                         WHERE project_id = ?",
                    )
                    .bind(&update.name)
                    .bind(update.estimated_hours.as_ref().map(mapper::db_decimal))
                    .bind(update.actual_hours.as_ref().map(mapper::db_decimal))
                    .bind(update.difficulty)
                    .bind(&update.notes)
                    .bind(update.id)
                    .execute(&mut **tx)
                    .await?;

                    Ok(result.rows_affected() == 1)
                })
            })
            .await
    }

    /// Delete the row by identifier. Returns whether exactly one row was
    /// affected. Material, step, and join rows go with it through the
    /// store's foreign-key cascade, not through application code.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let result = sqlx::query("DELETE FROM project WHERE project_id = ?")
                        .bind(id)
                        .execute(&mut **tx)
                        .await?;

                    Ok(result.rows_affected() == 1)
                })
            })
            .await
    }

    /// Whether a project row with the given identifier exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let row: Option<(i32,)> =
                        sqlx::query_as("SELECT 1 FROM project WHERE project_id = ?")
                            .bind(id)
                            .fetch_optional(&mut **tx)
                            .await?;

                    Ok(row.is_some())
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::categories::CategoryRepository;
    use crate::domain::materials::{MaterialDraft, MaterialRepository};
    use crate::domain::steps::StepRepository;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn deck_draft() -> ProjectDraft {
        ProjectDraft {
            name: "Build deck".to_string(),
            estimated_hours: Some(Decimal::from_str("20").unwrap()),
            actual_hours: Some(Decimal::from_str("0").unwrap()),
            difficulty: Some(3),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_insert_populates_identifier_and_echoes_scalars() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let draft = deck_draft();
        let project = repo.insert(&draft).await.unwrap();

        assert!(project.id > 0);
        assert_eq!(project.name, draft.name);
        assert_eq!(project.difficulty, draft.difficulty);
        assert!(project.materials.is_empty());
        assert!(project.steps.is_empty());
        assert!(project.categories.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_round_trips_scalars() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let inserted = repo.insert(&deck_draft()).await.unwrap();
        let fetched = repo.find_by_id(inserted.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, inserted.id);
        assert_eq!(fetched.name, "Build deck");
        assert_eq!(fetched.difficulty, Some(3));
        assert_eq!(fetched.notes, None);
        assert!(fetched.materials.is_empty());
        assert!(fetched.steps.is_empty());
        assert!(fetched.categories.is_empty());
    }

    #[tokio::test]
    async fn test_decimal_fields_keep_two_digit_scale() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let draft = ProjectDraft {
            name: "Tile bathroom".to_string(),
            estimated_hours: Some(Decimal::from_str("12.5").unwrap()),
            actual_hours: Some(Decimal::from_str("3").unwrap()),
            ..Default::default()
        };
        let inserted = repo.insert(&draft).await.unwrap();
        let fetched = repo.find_by_id(inserted.id).await.unwrap().unwrap();

        assert_eq!(fetched.estimated_hours.unwrap().to_string(), "12.50");
        assert_eq!(fetched.actual_hours.unwrap().to_string(), "3.00");
    }

    #[tokio::test]
    async fn test_find_by_id_returns_none_for_missing_row() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_is_sorted_and_summary_only() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let zebra = repo
            .insert(&ProjectDraft {
                name: "Zebra-stripe wall".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        repo.insert(&ProjectDraft {
            name: "Attic ladder".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        MaterialRepository::new(&db)
            .insert(
                zebra.id,
                &MaterialDraft {
                    name: "Paint".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let projects = repo.list_all().await.unwrap();
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Attic ladder", "Zebra-stripe wall"]);

        for project in &projects {
            assert!(project.materials.is_empty(), "list view must stay summary-only");
            assert!(project.steps.is_empty());
            assert!(project.categories.is_empty());
        }
    }

    #[tokio::test]
    async fn test_find_by_id_loads_nested_collections() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let project = repo.insert(&deck_draft()).await.unwrap();
        MaterialRepository::new(&db)
            .insert(
                project.id,
                &MaterialDraft {
                    name: "2x4 lumber".to_string(),
                    cost: Some(Decimal::from_str("8.75").unwrap()),
                    num_required: Some(12),
                },
            )
            .await
            .unwrap();
        StepRepository::new(&db)
            .insert(project.id, "Dig post holes")
            .await
            .unwrap();
        CategoryRepository::new(&db)
            .attach(project.id, "Carpentry")
            .await
            .unwrap();

        let fetched = repo.find_by_id(project.id).await.unwrap().unwrap();
        assert_eq!(fetched.materials.len(), 1);
        assert_eq!(fetched.materials[0].name, "2x4 lumber");
        assert_eq!(fetched.steps.len(), 1);
        assert_eq!(fetched.categories.len(), 1);
    }

    #[tokio::test]
    async fn test_update_details_replaces_all_scalars() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let project = repo.insert(&deck_draft()).await.unwrap();
        let update = ProjectUpdate {
            id: project.id,
            name: "Build bigger deck".to_string(),
            estimated_hours: Some(Decimal::from_str("28.25").unwrap()),
            actual_hours: Some(Decimal::from_str("4").unwrap()),
            difficulty: Some(4),
            notes: Some("Check lumber prices first".to_string()),
        };

        assert!(repo.update_details(&update).await.unwrap());

        let fetched = repo.find_by_id(project.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Build bigger deck");
        assert_eq!(fetched.estimated_hours.unwrap().to_string(), "28.25");
        assert_eq!(fetched.difficulty, Some(4));
        assert_eq!(fetched.notes.as_deref(), Some("Check lumber prices first"));
    }

    #[tokio::test]
    async fn test_update_details_on_missing_identifier_returns_false() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let update = ProjectUpdate {
            id: 42,
            name: "Ghost".to_string(),
            estimated_hours: None,
            actual_hours: None,
            difficulty: None,
            notes: None,
        };
        assert!(!repo.update_details(&update).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_returns_whether_a_row_was_removed() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let project = repo.insert(&deck_draft()).await.unwrap();
        assert!(repo.delete(project.id).await.unwrap());
        assert!(!repo.delete(project.id).await.unwrap());
        assert!(repo.find_by_id(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProjectRepository::new(&db);

        let project = repo.insert(&deck_draft()).await.unwrap();
        assert!(repo.exists(project.id).await.unwrap());
        assert!(!repo.exists(project.id + 1).await.unwrap());
    }
}
