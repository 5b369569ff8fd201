use base64::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};
use tracing::{debug, error};

use crate::db::DbPool;
use crate::error::{Result, StorageError};
use crate::local_storage::filter::Filter;
use crate::local_storage::schema::{self, TableSchema};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Generic, table-agnostic access to the local database.
///
/// Holds the single pooled connection. Table and column names are checked
/// against [`schema::TABLES`]; values are always bound positionally. The
/// `sql` of [`query`](Self::query) and the raw `where_clause` of
/// [`update`](Self::update)/[`delete`](Self::delete) are trusted caller
/// input and must never contain interpolated user data.
pub struct CoreLocalStorage {
    pool: DbPool,
}

impl CoreLocalStorage {
    pub fn new(pool: DbPool) -> Self {
        CoreLocalStorage { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Runs a parameterized read and deserializes every row into `T`.
    pub async fn query<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        let rows = self.query_rows(sql, params).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StorageError::from))
            .collect::<Result<Vec<T>>>()
            .inspect_err(|e| error!(operation = "query", error = %e, "Error decoding query result"))
    }

    /// Runs a parameterized read and returns each row as a JSON object keyed
    /// by column name.
    pub async fn query_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>> {
        debug!(sql, "Executing query");

        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)
            .inspect_err(|e| error!(operation = "query", error = %e, "Error executing query"))?;

        rows.iter()
            .map(|row| row_to_json(row).map_err(StorageError::from))
            .collect::<Result<Vec<Value>>>()
            .inspect_err(|e| error!(operation = "query", error = %e, "Error decoding row"))
    }

    /// Inserts one row and returns its autoincrement id.
    pub async fn insert(&self, table_name: &str, data: &Value) -> Result<i64> {
        self.try_insert(table_name, data)
            .await
            .inspect_err(|e| log_failure("insert", table_name, e))
    }

    async fn try_insert(&self, table_name: &str, data: &Value) -> Result<i64> {
        let table = schema::table(table_name)?;
        let map = as_object(data)?;
        if map.is_empty() {
            return Err(StorageError::EmptyData {
                operation: "insert",
                table: table_name.to_string(),
            });
        }

        // Columns and values come from the same pass so they stay in lockstep.
        let mut columns = Vec::with_capacity(map.len());
        let mut values = Vec::with_capacity(map.len());
        for (column, value) in map {
            table.check_column(column)?;
            columns.push(column.as_str());
            values.push(column_value(table, column, value));
        }

        let query = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );
        debug!(sql = %query, "Executing insert");

        let result = bind_all(sqlx::query(&query), &values)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates the rows matched by `where_clause` and returns how many changed.
    ///
    /// The `SET` values are bound first, `where_args` after them.
    pub async fn update(
        &self,
        table_name: &str,
        data: &Value,
        where_clause: &str,
        where_args: &[Value],
    ) -> Result<u64> {
        self.try_update(table_name, data, where_clause, where_args)
            .await
            .inspect_err(|e| log_failure("update", table_name, e))
    }

    /// [`update`](Self::update) with a structured predicate.
    pub async fn update_where(&self, table_name: &str, data: &Value, filter: &Filter) -> Result<u64> {
        async {
            let table = schema::table(table_name)?;
            let (clause, args) = filter.render(table)?;
            self.try_update(table_name, data, &clause, &args).await
        }
        .await
        .inspect_err(|e| log_failure("update", table_name, e))
    }

    async fn try_update(
        &self,
        table_name: &str,
        data: &Value,
        where_clause: &str,
        where_args: &[Value],
    ) -> Result<u64> {
        let table = schema::table(table_name)?;
        let map = as_object(data)?;
        if map.is_empty() {
            return Err(StorageError::EmptyData {
                operation: "update",
                table: table_name.to_string(),
            });
        }
        check_where_clause("update", table, where_clause)?;

        let mut updates = Vec::with_capacity(map.len());
        let mut values = Vec::with_capacity(map.len());
        for (column, value) in map {
            table.check_column(column)?;
            updates.push(format!("{} = ?", column));
            values.push(column_value(table, column, value));
        }

        let query = format!(
            "UPDATE {} SET {} WHERE {}",
            table.name,
            updates.join(", "),
            where_clause
        );
        debug!(sql = %query, "Executing update");

        let result = bind_all(bind_all(sqlx::query(&query), &values), where_args)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes the rows matched by `where_clause`; 0 when nothing matched.
    pub async fn delete(&self, table_name: &str, where_clause: &str, where_args: &[Value]) -> Result<u64> {
        self.try_delete(table_name, where_clause, where_args)
            .await
            .inspect_err(|e| log_failure("delete", table_name, e))
    }

    pub async fn delete_where(&self, table_name: &str, filter: &Filter) -> Result<u64> {
        async {
            let table = schema::table(table_name)?;
            let (clause, args) = filter.render(table)?;
            self.try_delete(table_name, &clause, &args).await
        }
        .await
        .inspect_err(|e| log_failure("delete", table_name, e))
    }

    async fn try_delete(&self, table_name: &str, where_clause: &str, where_args: &[Value]) -> Result<u64> {
        let table = schema::table(table_name)?;
        check_where_clause("delete", table, where_clause)?;

        let query = format!("DELETE FROM {} WHERE {}", table.name, where_clause);
        debug!(sql = %query, "Executing delete");

        let result = bind_all(sqlx::query(&query), where_args)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn get_by_id<T: DeserializeOwned>(&self, table_name: &str, id: i64) -> Result<Option<T>> {
        let table = schema::table(table_name).inspect_err(|e| log_failure("query", table_name, e))?;
        let query = format!("SELECT * FROM {} WHERE id = ?", table.name);

        let mut rows = self.query::<T>(&query, &[id.into()]).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(rows.swap_remove(0)))
    }

    /// Counts the rows matching `filter`; an empty filter counts the whole table.
    pub async fn count(&self, table_name: &str, filter: &Filter) -> Result<i64> {
        async {
            let table = schema::table(table_name)?;
            let (clause, args) = filter.render(table)?;

            let mut query = format!("SELECT COUNT(*) FROM {}", table.name);
            if !clause.is_empty() {
                query.push_str(" WHERE ");
                query.push_str(&clause);
            }

            let row = bind_all(sqlx::query(&query), &args)
                .fetch_one(&self.pool)
                .await?;

            Ok::<_, StorageError>(row.try_get::<i64, _>(0)?)
        }
        .await
        .inspect_err(|e| log_failure("count", table_name, e))
    }
}

fn log_failure(operation: &'static str, table: &str, err: &StorageError) {
    error!(operation, table, error = %err, "Storage operation failed");
}

fn as_object(data: &Value) -> Result<&Map<String, Value>> {
    data.as_object()
        .ok_or_else(|| StorageError::InvalidData("Data must be a JSON object".to_string()))
}

fn check_where_clause(operation: &'static str, table: &TableSchema, where_clause: &str) -> Result<()> {
    if where_clause.trim().is_empty() {
        return Err(StorageError::MissingWhereClause {
            operation,
            table: table.name.to_string(),
        });
    }
    Ok(())
}

fn bind_all<'q, 'v>(
    mut query: SqliteQuery<'q>,
    values: impl IntoIterator<Item = &'v Value>,
) -> SqliteQuery<'q> {
    for value in values {
        query = bind_value(query, value);
    }
    query
}

/// Numbers headed for a `REAL` column are sent as floats, so `100` and
/// `100.0` store and read back the same way.
fn column_value(table: &TableSchema, column: &str, value: &Value) -> Value {
    match value {
        Value::Number(n) if table.is_real(column) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| value.clone(), Value::Number),
        _ => value.clone(),
    }
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                query.bind(Option::<String>::None)
            }
        }
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => query.bind(value.to_string()),
    }
}

fn row_to_json(row: &SqliteRow) -> std::result::Result<Value, sqlx::Error> {
    let mut map = Map::new();
    for column in row.columns() {
        let value = get_value_from_row(row, column.ordinal())?;
        map.insert(column.name().to_string(), value);
    }
    Ok(Value::Object(map))
}

fn get_value_from_row(row: &SqliteRow, index: usize) -> std::result::Result<Value, sqlx::Error> {
    let type_name = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => {
            let val: i64 = row.try_get_unchecked(index)?;
            Ok(Value::Number(val.into()))
        }
        "REAL" | "NUMERIC" => {
            let val: f64 = row.try_get_unchecked(index)?;
            Ok(serde_json::Number::from_f64(val)
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        "BLOB" => {
            let val: Vec<u8> = row.try_get_unchecked(index)?;
            Ok(Value::String(BASE64_STANDARD.encode(&val)))
        }
        _ => {
            let val: String = row.try_get_unchecked(index)?;
            Ok(Value::String(val))
        }
    }
}
