//! Materials owned by a project

use crate::error::Result;
use crate::storage::mapper;
use crate::storage::Database;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;

/// A material required by a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub cost: Option<Decimal>,
    pub num_required: Option<i32>,
}

/// Field values for a material that has not been persisted yet
#[derive(Debug, Clone, Default)]
pub struct MaterialDraft {
    pub name: String,
    pub cost: Option<Decimal>,
    pub num_required: Option<i32>,
}

fn material_from_row(row: &SqliteRow) -> Result<Material> {
    Ok(Material {
        id: mapper::id_column(row, "material_id")?,
        project_id: mapper::id_column(row, "project_id")?,
        name: mapper::text_column(row, "material_name")?,
        cost: mapper::opt_decimal_column(row, "cost")?,
        num_required: mapper::opt_int_column(row, "num_required")?,
    })
}

/// All materials for a project, for use inside an open transaction
pub(crate) async fn for_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<Material>> {
    let rows = sqlx::query("SELECT * FROM material WHERE project_id = ?")
        .bind(project_id)
        .fetch_all(conn)
        .await?;

    rows.iter().map(material_from_row).collect()
}

/// Material data access
pub struct MaterialRepository<'a> {
    db: &'a Database,
}

impl<'a> MaterialRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a material row for the given project
    pub async fn insert(&self, project_id: i64, draft: &MaterialDraft) -> Result<Material> {
        let draft = draft.clone();
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let result = sqlx::query(
                        "INSERT INTO material (project_id, material_name, cost, num_required) \
                         VALUES (?, ?, ?, ?)",
                    )
                    .bind(project_id)
                    .bind(&draft.name)
                    .bind(draft.cost.as_ref().map(mapper::db_decimal))
                    .bind(draft.num_required)
                    .execute(&mut **tx)
                    .await?;

                    Ok(Material {
                        id: result.last_insert_rowid(),
                        project_id,
                        name: draft.name,
                        cost: draft.cost,
                        num_required: draft.num_required,
                    })
                })
            })
            .await
    }

    /// All materials for a project
    pub async fn list_for_project(&self, project_id: i64) -> Result<Vec<Material>> {
        self.db
            .transaction(move |tx| Box::pin(async move { for_project(&mut **tx, project_id).await }))
            .await
    }
}
