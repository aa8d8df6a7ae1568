//! People gateway
//!
//! Every call opens its own connection, makes sure the schema exists, runs
//! one statement and closes the connection again, whatever the outcome. No
//! connection outlives a call and nothing is cached between calls.
//!
//! Two flavours of operation sit on top of that:
//!
//! - raw statements ([`PeopleGateway::add`], [`PeopleGateway::read`]) executed
//!   verbatim, backing the `add_data` / `read_data` tools
//! - structured, parameterized operations ([`PeopleGateway::insert_person`],
//!   [`PeopleGateway::list_people`]) that never splice caller text into SQL

use rusqlite::{params, params_from_iter, types::Value as SqlValue, Batch, Connection};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;
use crate::error::GatewayError;
use crate::schema;
use crate::types::{NewPerson, PeopleFilter, Person, QueryRows, Row, SortField};

/// Query `read_data` runs when the caller gives none
pub const DEFAULT_READ_QUERY: &str = "SELECT * FROM people";

/// Gateway to the people store
#[derive(Debug, Clone)]
pub struct PeopleGateway {
    config: Arc<DatabaseConfig>,
}

impl PeopleGateway {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Execute a single insert statement and commit it
    ///
    /// Returns the number of rows the statement changed.
    pub fn add(&self, statement: &str) -> Result<usize, GatewayError> {
        self.with_connection(|conn| {
            single_statement(conn, statement)?;
            let tx = conn.transaction()?;
            let changed = tx.execute(statement, [])?;
            tx.commit()?;
            Ok(changed)
        })
    }

    /// Run a query and fetch every row in engine order
    ///
    /// The statement runs inside a transaction that is never committed, so a
    /// write smuggled in through a query is rolled back.
    pub fn read(&self, statement: &str) -> Result<QueryRows, GatewayError> {
        self.with_connection(|conn| {
            single_statement(conn, statement)?;
            let tx = conn.transaction()?;
            let mut stmt = tx.prepare(statement)?;

            let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
            let width = columns.len();

            let rows = stmt
                .query_map([], |row| {
                    (0..width)
                        .map(|i| row.get::<_, SqlValue>(i).map(to_json))
                        .collect::<rusqlite::Result<Row>>()
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(QueryRows { columns, rows })
        })
    }

    /// [`add`](Self::add) flattened to the `add_data` contract
    pub fn add_soft(&self, statement: &str) -> bool {
        soften_add(self.add(statement))
    }

    /// [`read`](Self::read) flattened to the `read_data` contract
    pub fn read_soft(&self, statement: &str) -> Vec<Row> {
        soften_read(self.read(statement))
    }

    /// Insert one person with bound parameters
    pub fn insert_person(&self, person: &NewPerson) -> Result<Person, GatewayError> {
        let name = required("name", &person.name)?;
        let profession = required("profession", &person.profession)?;

        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO people (name, age, profession) VALUES (?1, ?2, ?3)",
                params![name, person.age, profession],
            )?;

            Ok(Person {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
                age: person.age,
                profession: profession.to_string(),
            })
        })
    }

    /// List people matching a filter
    pub fn list_people(&self, filter: &PeopleFilter) -> Result<Vec<Person>, GatewayError> {
        if let (Some(min), Some(max)) = (filter.min_age, filter.max_age) {
            if min > max {
                return Err(GatewayError::Validation(format!(
                    "min_age ({}) is greater than max_age ({})",
                    min, max
                )));
            }
        }

        let (sql, values) = build_list_query(filter);
        debug!(%sql, "Listing people");

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let people = stmt
                .query_map(params_from_iter(values.iter()), |row| {
                    Ok(Person {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        age: row.get(2)?,
                        profession: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(people)
        })
    }

    /// Open a scoped connection, run `op`, close the connection
    fn with_connection<T>(
        &self,
        op: impl FnOnce(&mut Connection) -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        let mut conn = self.open()?;
        let outcome = op(&mut conn);

        // Dropping also closes; closing explicitly lets a failure be logged.
        if let Err((_, e)) = conn.close() {
            warn!(path = ?self.config.path, "Failed to close database cleanly: {}", e);
        }

        outcome
    }

    fn open(&self) -> Result<Connection, GatewayError> {
        let path = &self.config.path;
        let conn = Connection::open(path).map_err(|source| GatewayError::Open {
            path: path.clone(),
            source,
        })?;

        conn.busy_timeout(self.config.busy_timeout())
            .map_err(|source| GatewayError::Open {
                path: path.clone(),
                source,
            })?;

        schema::ensure_schema(&conn).map_err(GatewayError::Schema)?;
        Ok(conn)
    }
}

/// Collapse an insert outcome to `true`/`false`, logging the failure
pub fn soften_add(outcome: Result<usize, GatewayError>) -> bool {
    match outcome {
        Ok(changed) => {
            debug!(changed, "Insert committed");
            true
        }
        Err(e) => {
            warn!(kind = ?e.kind(), "Error adding data: {}", e);
            false
        }
    }
}

/// Collapse a query outcome to its rows, or none on failure
pub fn soften_read(outcome: Result<QueryRows, GatewayError>) -> Vec<Row> {
    match outcome {
        Ok(result) => {
            debug!(rows = result.rows.len(), "Query returned");
            result.rows
        }
        Err(e) => {
            warn!(kind = ?e.kind(), "Error reading data: {}", e);
            Vec::new()
        }
    }
}

/// Reject input holding more than one statement
///
/// Only the first statement would run otherwise, and the rest would be
/// dropped without a word.
fn single_statement(conn: &Connection, sql: &str) -> Result<(), GatewayError> {
    let mut batch = Batch::new(conn, sql);
    let mut count = 0;
    while batch.next()?.is_some() {
        count += 1;
        if count > 1 {
            return Err(GatewayError::Statement(rusqlite::Error::MultipleStatement));
        }
    }
    Ok(())
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, GatewayError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

fn build_list_query(filter: &PeopleFilter) -> (String, Vec<SqlValue>) {
    let mut sql = String::from("SELECT id, name, age, profession FROM people");
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(min) = filter.min_age {
        values.push(SqlValue::Integer(min));
        clauses.push(format!("age >= ?{}", values.len()));
    }
    if let Some(max) = filter.max_age {
        values.push(SqlValue::Integer(max));
        clauses.push(format!("age <= ?{}", values.len()));
    }
    if let Some(profession) = &filter.profession {
        values.push(SqlValue::Text(profession.clone()));
        clauses.push(format!("profession = ?{}", values.len()));
    }
    if let Some(fragment) = &filter.name_contains {
        values.push(SqlValue::Text(format!("%{}%", escape_like(fragment))));
        clauses.push(format!("name LIKE ?{} ESCAPE '\\'", values.len()));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    let direction = if filter.descending { "DESC" } else { "ASC" };
    sql.push_str(&format!(" ORDER BY {} {}", filter.order_by.column(), direction));
    if filter.order_by != SortField::Id {
        // Stable order for ties
        sql.push_str(", id ASC");
    }

    if let Some(limit) = filter.limit {
        values.push(SqlValue::Integer(i64::from(limit)));
        sql.push_str(&format!(" LIMIT ?{}", values.len()));
    }

    (sql, values)
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_json(value: SqlValue) -> serde_json::Value {
    match value {
        SqlValue::Null => serde_json::Value::Null,
        SqlValue::Integer(i) => serde_json::json!(i),
        SqlValue::Real(f) => serde_json::json!(f),
        SqlValue::Text(s) => serde_json::Value::String(s),
        SqlValue::Blob(b) => serde_json::Value::String(format!("<blob {} bytes>", b.len())),
    }
}
