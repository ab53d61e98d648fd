//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use student_records::cache::{CacheProvider, TypedCache};
use student_records::database::{InMemoryStudentStore, StoreResult, StudentStore};
use student_records::facade::StudentFacade;
use student_records::models::Student;
use student_records::services::StudentService;
use student_records::types::{StudentRequest, StudentView};

/// In-memory store that counts reads and can be told to refuse deletes
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: InMemoryStudentStore,
    pub find_by_id_calls: AtomicUsize,
    pub find_by_name_calls: AtomicUsize,
    pub find_page_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    /// When set, deletes affect zero rows even if the row exists
    pub refuse_deletes: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn by_id(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn by_name(&self) -> usize {
        self.find_by_name_calls.load(Ordering::SeqCst)
    }

    pub fn pages(&self) -> usize {
        self.find_page_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn refuse_deletes(&self) {
        self.refuse_deletes.store(true, Ordering::SeqCst);
    }

    /// Remove a row without going through the facade
    pub async fn delete_behind_cache(&self, id: i64) {
        self.inner.delete_by_id(id).await.unwrap();
    }
}

#[async_trait]
impl StudentStore for CountingStore {
    async fn insert(&self, request: &StudentRequest) -> StoreResult<Student> {
        self.inner.insert(request).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Student>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Student>> {
        self.find_by_name_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_name(name).await
    }

    async fn update_by_id(&self, id: i64, request: &StudentRequest) -> StoreResult<u64> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update_by_id(id, request).await
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<u64> {
        if self.refuse_deletes.load(Ordering::SeqCst) {
            return Ok(0);
        }
        self.inner.delete_by_id(id).await
    }

    async fn find_page(
        &self,
        limit: i64,
        offset: i64,
        name_filter: &str,
    ) -> StoreResult<Vec<Student>> {
        self.find_page_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_page(limit, offset, name_filter).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }

    fn backend_name(&self) -> &'static str {
        "counting-memory"
    }
}

/// Builder for student requests with sensible defaults
pub struct StudentRequestBuilder {
    name: String,
    age: String,
    student_class: String,
    phone_number: i64,
}

impl StudentRequestBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            age: "14".to_string(),
            student_class: "9B".to_string(),
            phone_number: 5_551_000,
        }
    }

    pub fn with_age(mut self, age: &str) -> Self {
        self.age = age.to_string();
        self
    }

    pub fn with_class(mut self, student_class: &str) -> Self {
        self.student_class = student_class.to_string();
        self
    }

    pub fn with_phone(mut self, phone_number: i64) -> Self {
        self.phone_number = phone_number;
        self
    }

    pub fn build(self) -> StudentRequest {
        StudentRequest {
            name: self.name,
            age: self.age,
            student_class: self.student_class,
            phone_number: self.phone_number,
        }
    }
}

pub fn request(name: &str) -> StudentRequest {
    StudentRequestBuilder::new(name).build()
}

/// Facade over a counting store and an in-process Moka cache without expiry
#[cfg(feature = "cache-moka")]
pub fn moka_facade() -> (StudentFacade<TypedCache<StudentView>>, Arc<CountingStore>) {
    let store = CountingStore::new();
    let service = StudentService::new(store.clone());
    let facade = StudentFacade::new(service, TypedCache::new(CacheProvider::moka(1_000, None)));
    (facade, store)
}

/// Insert one student per name, in order, returning the created rows
pub async fn seed<C>(facade: &StudentFacade<C>, names: &[&str]) -> Vec<Student>
where
    C: student_records::facade::StudentCache,
{
    let mut created = Vec::with_capacity(names.len());
    for name in names {
        created.push(facade.add_student(&request(name)).await.unwrap());
    }
    created
}
