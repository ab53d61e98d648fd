//! PostgreSQL record store

use super::errors::{StoreError, StoreResult};
use super::store::StudentStore;
use crate::models::Student;
use crate::types::StudentRequest;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Idempotent DDL for the `student` table
pub const STUDENT_SCHEMA: &str = include_str!("../../schema/students.sql");

const STUDENT_COLUMNS: &str =
    "id, name, age, student_class, phone_number, created_at, updated_at";

/// `StudentStore` over a shared `PgPool`
#[derive(Debug, Clone)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `student` table and its indexes if they are missing
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(STUDENT_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("ensure_schema", e))?;
        debug!("Student schema ensured");
        Ok(())
    }
}

/// Escape LIKE metacharacters so the filter is matched literally
fn escape_like(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len());
    for c in filter.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn insert(&self, request: &StudentRequest) -> StoreResult<Student> {
        let sql = format!(
            "INSERT INTO student (name, age, student_class, phone_number, created_at, updated_at) \
             SELECT $1, $2, $3, $4, now_ts.ts, now_ts.ts \
             FROM (SELECT clock_timestamp()::timestamp AS ts) AS now_ts \
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(&request.name)
            .bind(&request.age)
            .bind(&request.student_class)
            .bind(request.phone_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("insert", e))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Student>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM student WHERE id = $1");
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("find_by_id", e))
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM student \
             WHERE name = $1 \
             ORDER BY updated_at ASC, id ASC"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("find_by_name", e))
    }

    async fn update_by_id(&self, id: i64, request: &StudentRequest) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE student \
             SET name = $1, age = $2, student_class = $3, phone_number = $4, \
                 updated_at = clock_timestamp() \
             WHERE id = $5",
        )
        .bind(&request.name)
        .bind(&request.age)
        .bind(&request.student_class)
        .bind(request.phone_number)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("update_by_id", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM student WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("delete_by_id", e))?;

        Ok(result.rows_affected())
    }

    async fn find_page(
        &self,
        limit: i64,
        offset: i64,
        name_filter: &str,
    ) -> StoreResult<Vec<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM student \
             WHERE LOWER(name) LIKE '%' || LOWER($1) || '%' ESCAPE '\\' \
             ORDER BY updated_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(escape_like(name_filter))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("find_page", e))
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("health_check", e))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
