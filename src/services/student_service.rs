//! # Student Service
//!
//! Translates student operations into record store calls and turns
//! "nothing matched" outcomes into typed errors. Never touches the cache.

use crate::database::StudentStore;
use crate::errors::{StudentError, StudentResult};
use crate::logging::log_student_operation;
use crate::models::Student;
use crate::types::StudentRequest;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl std::fmt::Debug for StudentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentService")
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn StudentStore> {
        &self.store
    }

    /// Persist a new student; store rejections propagate as store errors
    pub async fn add_student(&self, request: &StudentRequest) -> StudentResult<Student> {
        let student = self.store.insert(request).await?;
        log_student_operation("create", Some(student.id), "success", None);
        Ok(student)
    }

    pub async fn get_student_by_id(&self, id: i64) -> StudentResult<Student> {
        debug!(student_id = id, "Store lookup by id");
        self.store
            .find_by_id(id)
            .await?
            .ok_or(StudentError::NotFound { id })
    }

    /// Exact-name lookup; an empty result is not an error
    pub async fn get_student_by_name(&self, name: &str) -> StudentResult<Vec<Student>> {
        debug!(name = name, "Store lookup by name");
        Ok(self.store.find_by_name(name).await?)
    }

    /// Returns `true` or fails with `DeletionFailed` when no row was removed
    pub async fn delete_student(&self, id: i64) -> StudentResult<bool> {
        if self.store.delete_by_id(id).await? == 0 {
            log_student_operation("delete", Some(id), "not_found", None);
            return Err(StudentError::DeletionFailed { id });
        }
        log_student_operation("delete", Some(id), "success", None);
        Ok(true)
    }

    /// Returns `true` or fails with `UpdateFailed` when no row was changed
    pub async fn update_student_info_by_id(
        &self,
        request: &StudentRequest,
        id: i64,
    ) -> StudentResult<bool> {
        if self.store.update_by_id(id, request).await? == 0 {
            log_student_operation("update", Some(id), "not_found", None);
            return Err(StudentError::UpdateFailed { id });
        }
        log_student_operation("update", Some(id), "success", None);
        Ok(true)
    }

    /// One page of students, newest update first, filtered by name substring
    pub async fn get_all_students_info(
        &self,
        limit: i64,
        offset: i64,
        name_filter: &str,
    ) -> StudentResult<Vec<Student>> {
        debug!(limit, offset, name_filter, "Store page query");
        Ok(self.store.find_page(limit, offset, name_filter).await?)
    }
}
