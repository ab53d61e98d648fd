//! In-process record store
//!
//! Keeps rows in a `BTreeMap` behind a `parking_lot::RwLock`. Used for
//! local runs without PostgreSQL and by the facade tests.

use super::errors::StoreResult;
use super::store::StudentStore;
use crate::models::Student;
use crate::types::StudentRequest;
use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Student>,
    last_id: i64,
    last_timestamp: Option<NaiveDateTime>,
}

impl MemoryState {
    /// Wall-clock time, nudged forward so no two mutations share a timestamp
    fn next_timestamp(&mut self) -> NaiveDateTime {
        let now = Utc::now().naive_utc();
        let ts = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_window(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn insert(&self, request: &StudentRequest) -> StoreResult<Student> {
        let mut state = self.state.write();
        state.last_id += 1;
        let id = state.last_id;
        let ts = state.next_timestamp();

        let student = Student {
            id,
            name: request.name.clone(),
            age: request.age.clone(),
            student_class: request.student_class.clone(),
            phone_number: request.phone_number,
            created_at: ts,
            updated_at: ts,
        };
        state.rows.insert(id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Student>> {
        Ok(self.state.read().rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Student>> {
        let state = self.state.read();
        let mut matches: Vec<Student> = state
            .rows
            .values()
            .filter(|s| s.name == name)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn update_by_id(&self, id: i64, request: &StudentRequest) -> StoreResult<u64> {
        let mut state = self.state.write();
        if !state.rows.contains_key(&id) {
            return Ok(0);
        }
        let ts = state.next_timestamp();
        if let Some(row) = state.rows.get_mut(&id) {
            row.name = request.name.clone();
            row.age = request.age.clone();
            row.student_class = request.student_class.clone();
            row.phone_number = request.phone_number;
            row.updated_at = ts;
        }
        Ok(1)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<u64> {
        Ok(u64::from(self.state.write().rows.remove(&id).is_some()))
    }

    async fn find_page(
        &self,
        limit: i64,
        offset: i64,
        name_filter: &str,
    ) -> StoreResult<Vec<Student>> {
        let needle = name_filter.to_lowercase();
        let state = self.state.read();
        let mut matches: Vec<Student> = state
            .rows
            .values()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(matches
            .into_iter()
            .skip(to_window(offset))
            .take(to_window(limit))
            .collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
