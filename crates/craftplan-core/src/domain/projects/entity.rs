//! Project entity and the value types used to create and update it

use crate::domain::categories::Category;
use crate::domain::materials::Material;
use crate::domain::steps::Step;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tracked project.
///
/// The identifier is assigned by the store on insert and never changes.
/// Nested collections are populated only by the single-record fetch;
/// list views leave them empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    /// 1 (easy) to 5 (hard); not validated at this layer
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Scalar field values for a project that has not been persisted yet
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
}

/// Replacement values for all five scalar fields of an existing project
#[derive(Debug, Clone)]
pub struct ProjectUpdate {
    pub id: i64,
    pub name: String,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
}
