//! # Student Facade
//!
//! Cache-aside orchestration over [`StudentService`].
//!
//! | Operation | Cache behaviour |
//! |---|---|
//! | create | none |
//! | read by id | point entry `student_<id>`, populated on miss |
//! | read by name | search entry `search_<name>`, populated on miss |
//! | delete | point entry removed after a successful delete, if present |
//! | update | point entry overwritten if present; old name's search entry removed on rename |
//! | list all | none |
//!
//! Service errors pass through unchanged. Cache failures also propagate:
//! there is no fallback to store-only reads.

use crate::cache::{escape_pattern, BucketStore, KeyPatternStore, ListStore, TypedCache};
use crate::errors::StudentResult;
use crate::logging::log_cache_invalidation;
use crate::models::Student;
use crate::services::StudentService;
use crate::types::{StudentRequest, StudentView};
use tracing::debug;

/// Cache capabilities the facade needs
pub trait StudentCache:
    BucketStore<StudentView> + ListStore<StudentView> + KeyPatternStore
{
}

impl<T> StudentCache for T where
    T: BucketStore<StudentView> + ListStore<StudentView> + KeyPatternStore
{
}

/// Point entry key for one student
pub fn student_key(id: i64) -> String {
    format!("student_{id}")
}

/// Search entry key for an exact-name query
pub fn search_key(name: &str) -> String {
    format!("search_{name}")
}

#[derive(Debug, Clone)]
pub struct StudentFacade<C = TypedCache<StudentView>> {
    service: StudentService,
    cache: C,
}

impl<C: StudentCache> StudentFacade<C> {
    pub fn new(service: StudentService, cache: C) -> Self {
        Self { service, cache }
    }

    pub fn service(&self) -> &StudentService {
        &self.service
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub async fn add_student(&self, request: &StudentRequest) -> StudentResult<Student> {
        self.service.add_student(request).await
    }

    /// Read-through lookup by id
    ///
    /// A hit never reaches the store. A miss loads the row, caches its view
    /// and returns it.
    pub async fn get_student_by_id(&self, id: i64) -> StudentResult<StudentView> {
        let key = student_key(id);
        if self.cache.bucket_exists(&key).await? {
            if let Some(view) = self.cache.get_bucket(&key).await? {
                debug!(key = %key, "Student cache hit");
                return Ok(view);
            }
        }

        debug!(key = %key, "Student cache miss");
        let view = self.service.get_student_by_id(id).await?.to_view();
        self.cache.save_bucket(&key, &view).await?;
        Ok(view)
    }

    /// Read-through exact-name search
    ///
    /// An empty result leaves no search entry, so it is re-queried next time.
    pub async fn get_student_by_name(&self, name: &str) -> StudentResult<Vec<StudentView>> {
        let key = search_key(name);
        if self.cache.list_exists(&key).await? {
            debug!(key = %key, "Search cache hit");
            return Ok(self.cache.get_list(&key).await?);
        }

        debug!(key = %key, "Search cache miss");
        let views: Vec<StudentView> = self
            .service
            .get_student_by_name(name)
            .await?
            .iter()
            .map(Student::to_view)
            .collect();
        self.cache.save_list(&key, &views).await?;
        Ok(views)
    }

    /// Delete a student, dropping its point entry only once the row is gone
    pub async fn delete_student(&self, id: i64) -> StudentResult<bool> {
        let deleted = self.service.delete_student(id).await?;

        let key = student_key(id);
        if deleted && self.cache.bucket_exists(&key).await? {
            let removed = self.cache.delete_bucket(&key).await?;
            log_cache_invalidation(&key, "student deleted", u64::from(removed));
        }
        Ok(deleted)
    }

    /// Update a student and reconcile its cache entries
    ///
    /// The pre-update view is read through the cache first, so an absent id
    /// fails with `NotFound` before the store is asked to update. After a
    /// successful update the point entry (if cached) is overwritten with the
    /// view built from `request`, and a rename removes the old name's search
    /// entry. The new name's search entry is not touched and may be stale
    /// until it expires.
    pub async fn update_student_info_by_id(
        &self,
        request: &StudentRequest,
        id: i64,
    ) -> StudentResult<bool> {
        let previous = self.get_student_by_id(id).await?;
        let updated = self.service.update_student_info_by_id(request, id).await?;
        if !updated {
            return Ok(false);
        }

        let key = student_key(id);
        let current = StudentView::from_request(request, id);
        if self.cache.bucket_exists(&key).await? {
            self.cache.save_bucket(&key, &current).await?;
        }

        let previous_search = search_key(&previous.name);
        if previous.name != current.name && self.cache.list_exists(&previous_search).await? {
            let removed = self
                .cache
                .delete_keys_by_pattern(&escape_pattern(&previous_search))
                .await?;
            log_cache_invalidation(&previous_search, "student renamed", removed);
        }

        Ok(true)
    }

    /// Paginated listing, always served by the store
    pub async fn get_all_students_info(
        &self,
        limit: i64,
        offset: i64,
        name_filter: &str,
    ) -> StudentResult<Vec<StudentView>> {
        Ok(self
            .service
            .get_all_students_info(limit, offset, name_filter)
            .await?
            .iter()
            .map(Student::to_view)
            .collect())
    }
}
