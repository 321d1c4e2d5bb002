//! Categories shared across projects through a join table

use crate::error::Result;
use crate::storage::mapper;
use crate::storage::Database;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;

/// A category a project can be tagged with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

fn category_from_row(row: &SqliteRow) -> Result<Category> {
    Ok(Category {
        id: mapper::id_column(row, "category_id")?,
        name: mapper::text_column(row, "category_name")?,
    })
}

/// All categories attached to a project, for use inside an open transaction
pub(crate) async fn for_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<Category>> {
    let rows = sqlx::query(
        "SELECT c.* FROM category c \
         JOIN project_category pc USING (category_id) \
         WHERE pc.project_id = ?",
    )
    .bind(project_id)
    .fetch_all(conn)
    .await?;

    rows.iter().map(category_from_row).collect()
}

/// Category data access
pub struct CategoryRepository<'a> {
    db: &'a Database,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All known categories ordered by name
    pub async fn list_all(&self) -> Result<Vec<Category>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let rows = sqlx::query("SELECT * FROM category ORDER BY category_name")
                        .fetch_all(&mut **tx)
                        .await?;

                    rows.iter().map(category_from_row).collect()
                })
            })
            .await
    }

    /// Attach a category to a project by name.
    ///
    /// Reuses the category row when the name already exists, creates it
    /// otherwise, then records the relation in the join table. Both
    /// statements run in one transaction. Attaching the same category
    /// twice violates the join table's primary key and fails like any
    /// other constraint violation.
    pub async fn attach(&self, project_id: i64, name: &str) -> Result<Category> {
        let name = name.to_string();
        self.db
            .transaction(move |tx| {
                Box::pin(async move {
                    let existing = sqlx::query(
                        "SELECT * FROM category WHERE category_name = ?",
                    )
                    .bind(&name)
                    .fetch_optional(&mut **tx)
                    .await?;

                    let category = match existing {
                        Some(row) => category_from_row(&row)?,
                        None => {
                            let result =
                                sqlx::query("INSERT INTO category (category_name) VALUES (?)")
                                    .bind(&name)
                                    .execute(&mut **tx)
                                    .await?;
                            Category {
                                id: result.last_insert_rowid(),
                                name,
                            }
                        }
                    };

                    sqlx::query(
                        "INSERT INTO project_category (project_id, category_id) VALUES (?, ?)",
                    )
                    .bind(project_id)
                    .bind(category.id)
                    .execute(&mut **tx)
                    .await?;

                    Ok(category)
                })
            })
            .await
    }
}
