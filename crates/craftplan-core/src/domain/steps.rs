//! Ordered steps owned by a project

use crate::error::Result;
use crate::storage::mapper;
use crate::storage::Database;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;

/// One step in a project's sequence of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: i64,
    pub project_id: i64,
    pub text: String,
    pub step_order: i32,
}

fn step_from_row(row: &SqliteRow) -> Result<Step> {
    Ok(Step {
        id: mapper::id_column(row, "step_id")?,
        project_id: mapper::id_column(row, "project_id")?,
        text: mapper::text_column(row, "step_text")?,
        step_order: mapper::int_column(row, "step_order")?,
    })
}

/// All steps for a project in step order, for use inside an open transaction
pub(crate) async fn for_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<Step>> {
    let rows = sqlx::query("SELECT * FROM step WHERE project_id = ? ORDER BY step_order")
        .bind(project_id)
        .fetch_all(conn)
        .await?;

    rows.iter().map(step_from_row).collect()
}

/// Step data access
pub struct StepRepository<'a> {
    db: &'a Database,
}

impl<'a> StepRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Append a step at the end of the project's sequence.
    ///
    /// The next order value is computed and the row inserted in the same
    /// transaction, so the sequence has no gaps or duplicates.
    pub async fn insert(&self, project_id: i64, text: &str) -> Result<Step> {
        let text = text.to_string();
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let (next_order,): (i32,) = sqlx::query_as(
                        "SELECT COALESCE(MAX(step_order), 0) + 1 FROM step WHERE project_id = ?",
                    )
                    .bind(project_id)
                    .fetch_one(&mut **tx)
                    .await?;

                    let result = sqlx::query(
                        "INSERT INTO step (project_id, step_text, step_order) VALUES (?, ?, ?)",
                    )
                    .bind(project_id)
                    .bind(&text)
                    .bind(next_order)
                    .execute(&mut **tx)
                    .await?;

                    Ok(Step {
                        id: result.last_insert_rowid(),
                        project_id,
                        text,
                        step_order: next_order,
                    })
                })
            })
            .await
    }

    /// All steps for a project in step order
    pub async fn list_for_project(&self, project_id: i64) -> Result<Vec<Step>> {
        self.db
            .transaction(move |tx| Box::pin(async move { for_project(&mut **tx, project_id).await }))
            .await
    }
}
