//! Core types for the people store

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One result row, column values in select order
pub type Row = Vec<serde_json::Value>;

/// A stored person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub profession: String,
}

/// Fields for a new person; the id is assigned by SQLite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub age: i64,
    pub profession: String,
}

/// Column used to order `list_people` results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Age,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Age => "age",
        }
    }
}

/// Filter for structured people queries
#[derive(Debug, Clone, Default)]
pub struct PeopleFilter {
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub profession: Option<String>,
    pub name_contains: Option<String>,
    pub order_by: SortField,
    pub descending: bool,
    pub limit: Option<u32>,
}

/// Result of a raw query with the column names SQLite reported
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}
