//! Parameter definitions for sqlite-mcp tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gateway::DEFAULT_READ_QUERY;
use crate::types::{NewPerson, PeopleFilter, SortField};

// ============================================================================
// Raw statement tools
// ============================================================================

/// Parameters for add_data tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddDataParams {
    /// SQL INSERT statement, e.g.
    /// INSERT INTO people (name, age, profession) VALUES ('Jhon Doe', 30, 'Engineer')
    pub query: String,
}

/// Parameters for read_data tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadDataParams {
    /// SQL SELECT statement, e.g. SELECT name, age FROM people WHERE age > 25
    #[serde(default = "default_read_query")]
    pub query: String,
}

impl Default for ReadDataParams {
    fn default() -> Self {
        Self {
            query: default_read_query(),
        }
    }
}

fn default_read_query() -> String {
    DEFAULT_READ_QUERY.to_string()
}

// ============================================================================
// Structured tools
// ============================================================================

/// Parameters for add_person tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddPersonParams {
    /// Person's name (non-empty)
    pub name: String,
    /// Age in years
    pub age: i64,
    /// Profession (non-empty)
    pub profession: String,
}

impl From<AddPersonParams> for NewPerson {
    fn from(params: AddPersonParams) -> Self {
        NewPerson {
            name: params.name,
            age: params.age,
            profession: params.profession,
        }
    }
}

/// Parameters for list_people tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListPeopleParams {
    /// Only people at least this old
    #[serde(default)]
    pub min_age: Option<i64>,
    /// Only people at most this old
    #[serde(default)]
    pub max_age: Option<i64>,
    /// Exact profession match
    #[serde(default)]
    pub profession: Option<String>,
    /// Substring the name must contain (case-insensitive for ASCII)
    #[serde(default)]
    pub name_contains: Option<String>,
    /// Sort column: id (default), name, or age
    #[serde(default)]
    pub order_by: Option<SortField>,
    /// Sort descending instead of ascending
    #[serde(default)]
    pub descending: Option<bool>,
    /// Maximum number of people to return
    #[serde(default)]
    pub limit: Option<u32>,
}

impl From<ListPeopleParams> for PeopleFilter {
    fn from(params: ListPeopleParams) -> Self {
        PeopleFilter {
            min_age: params.min_age,
            max_age: params.max_age,
            profession: params.profession,
            name_contains: params.name_contains,
            order_by: params.order_by.unwrap_or_default(),
            descending: params.descending.unwrap_or(false),
            limit: params.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_params_default_query() {
        let params: ReadDataParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.query, "SELECT * FROM people");
        assert_eq!(ReadDataParams::default().query, params.query);
    }

    #[test]
    fn test_add_params_require_query() {
        assert!(serde_json::from_value::<AddDataParams>(json!({})).is_err());
    }

    #[test]
    fn test_list_params_into_filter() {
        let params: ListPeopleParams =
            serde_json::from_value(json!({"order_by": "age", "descending": true, "limit": 3}))
                .unwrap();
        let filter = PeopleFilter::from(params);
        assert_eq!(filter.order_by, SortField::Age);
        assert!(filter.descending);
        assert_eq!(filter.limit, Some(3));
        assert!(filter.min_age.is_none());
    }

    #[test]
    fn test_list_params_reject_unknown_sort() {
        let result = serde_json::from_value::<ListPeopleParams>(json!({"order_by": "salary"}));
        assert!(result.is_err());
    }
}
