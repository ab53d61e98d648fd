//! Cache-aside behaviour of `StudentFacade` against an in-process Moka cache

#![cfg(feature = "cache-moka")]

mod common;

use common::*;
use student_records::cache::{BucketStore, CacheError, CacheResult, KeyPatternStore, ListStore};
use student_records::facade::StudentFacade;
use student_records::services::StudentService;
use student_records::types::StudentView;
use student_records::{ErrorKind, StudentError};

#[tokio::test]
async fn test_create_assigns_fresh_ids_and_caches_nothing() {
    let (facade, _store) = moka_facade();

    let created = seed(&facade, &["Alice", "Bob"]).await;
    assert_eq!(created[0].id, 1);
    assert_eq!(created[1].id, 2);
    assert_eq!(created[0].created_at, created[0].updated_at);

    assert!(!facade.cache().bucket_exists("student_1").await.unwrap());
    assert!(!facade.cache().list_exists("search_Alice").await.unwrap());
}

#[tokio::test]
async fn test_read_by_id_is_served_from_cache_after_first_miss() {
    let (facade, store) = moka_facade();
    let request = StudentRequestBuilder::new("Alice")
        .with_age("15")
        .with_class("10A")
        .with_phone(5_550_123)
        .build();
    let created = facade.add_student(&request).await.unwrap();

    let first = facade.get_student_by_id(created.id).await.unwrap();
    let second = facade.get_student_by_id(created.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.phone_number, "5550123");
    assert_eq!(first.student_class, "10A");
    assert_eq!(store.by_id(), 1);
    assert!(facade.cache().bucket_exists("student_1").await.unwrap());
}

#[tokio::test]
async fn test_absent_id_fails_without_creating_cache_entries() {
    let (facade, _store) = moka_facade();
    seed(&facade, &["Alice"]).await;

    let err = facade.get_student_by_id(999).await.unwrap_err();
    assert!(matches!(err, StudentError::NotFound { id: 999 }));
    assert_eq!(err.to_string(), "Student record not found");
    assert!(!facade.cache().bucket_exists("student_999").await.unwrap());

    let err = facade.delete_student(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeletionFailed);

    let err = facade
        .update_student_info_by_id(&request("Ghost"), 999)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!facade.cache().bucket_exists("student_999").await.unwrap());
}

#[tokio::test]
async fn test_rename_invalidates_old_search_and_leaves_new_search_stale() {
    let (facade, store) = moka_facade();
    seed(&facade, &["Zed", "Bob", "Xia", "Wu", "Alice"]).await;

    let alices = facade.get_student_by_name("Alice").await.unwrap();
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].id, 5);
    let bobs = facade.get_student_by_name("Bob").await.unwrap();
    assert_eq!(bobs.len(), 1);
    facade.get_student_by_id(5).await.unwrap();

    let updated = facade
        .update_student_info_by_id(&StudentRequestBuilder::new("Bob").with_age("16").build(), 5)
        .await
        .unwrap();
    assert!(updated);

    let point: StudentView = facade.cache().get_bucket("student_5").await.unwrap().unwrap();
    assert_eq!(point.name, "Bob");
    assert_eq!(point.age, "16");
    assert!(!facade.cache().list_exists("search_Alice").await.unwrap());

    // The new name's search entry still holds the pre-update result
    let name_queries = store.by_name();
    let bobs = facade.get_student_by_name("Bob").await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].id, 2);
    assert_eq!(store.by_name(), name_queries);

    let view = facade.get_student_by_id(5).await.unwrap();
    assert_eq!(view.name, "Bob");
}

#[tokio::test]
async fn test_update_populates_point_entry_through_pre_read() {
    let (facade, store) = moka_facade();
    seed(&facade, &["Alice"]).await;

    facade
        .update_student_info_by_id(&StudentRequestBuilder::new("Alice").with_class("11C").build(), 1)
        .await
        .unwrap();

    let point: StudentView = facade.cache().get_bucket("student_1").await.unwrap().unwrap();
    assert_eq!(point.student_class, "11C");

    let view = facade.get_student_by_id(1).await.unwrap();
    assert_eq!(view.student_class, "11C");
    assert_eq!(store.by_id(), 1);

    let row = facade.service().get_student_by_id(1).await.unwrap();
    assert!(row.updated_at > row.created_at);
}

#[tokio::test]
async fn test_update_without_rename_keeps_search_entry() {
    let (facade, _store) = moka_facade();
    seed(&facade, &["Alice"]).await;
    facade.get_student_by_name("Alice").await.unwrap();

    facade
        .update_student_info_by_id(&StudentRequestBuilder::new("Alice").with_age("18").build(), 1)
        .await
        .unwrap();

    assert!(facade.cache().list_exists("search_Alice").await.unwrap());
    let cached = facade.get_student_by_name("Alice").await.unwrap();
    assert_eq!(cached[0].age, "14");
}

#[tokio::test]
async fn test_update_fails_when_row_vanishes_behind_cached_entry() {
    let (facade, store) = moka_facade();
    seed(&facade, &["Alice"]).await;
    facade.get_student_by_id(1).await.unwrap();

    store.delete_behind_cache(1).await;

    let err = facade
        .update_student_info_by_id(&request("Alice"), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, StudentError::UpdateFailed { id: 1 }));
    assert_eq!(err.to_string(), "Student Record is not updated or not found");
}

#[tokio::test]
async fn test_delete_removes_point_entry() {
    let (facade, _store) = moka_facade();
    seed(&facade, &["A", "B", "C", "D", "E", "F", "Gus"]).await;
    facade.get_student_by_id(7).await.unwrap();

    assert!(facade.delete_student(7).await.unwrap());
    assert!(!facade.cache().bucket_exists("student_7").await.unwrap());

    let err = facade.get_student_by_id(7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_failed_delete_keeps_point_entry() {
    let (facade, store) = moka_facade();
    seed(&facade, &["Alice"]).await;
    facade.get_student_by_id(1).await.unwrap();
    store.refuse_deletes();

    let err = facade.delete_student(1).await.unwrap_err();
    assert!(matches!(err, StudentError::DeletionFailed { id: 1 }));
    assert_eq!(err.to_string(), "Student Record is not deleted or not found");
    assert!(facade.cache().bucket_exists("student_1").await.unwrap());
}

#[tokio::test]
async fn test_name_search_hit_skips_store() {
    let (facade, store) = moka_facade();
    seed(&facade, &["Alice", "Bob", "Alice"]).await;

    let first = facade.get_student_by_name("Alice").await.unwrap();
    let second = facade.get_student_by_name("Alice").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(store.by_name(), 1);
}

#[tokio::test]
async fn test_empty_name_search_is_not_cached() {
    let (facade, store) = moka_facade();
    seed(&facade, &["Alice"]).await;

    assert!(facade.get_student_by_name("Nobody").await.unwrap().is_empty());
    assert!(facade.get_student_by_name("Nobody").await.unwrap().is_empty());

    assert_eq!(store.by_name(), 2);
    assert!(!facade.cache().list_exists("search_Nobody").await.unwrap());
}

#[tokio::test]
async fn test_listing_pages_newest_first_and_is_never_cached() {
    let (facade, store) = moka_facade();
    seed(&facade, &["Alice", "Bob", "Carol", "Dan", "Eve"]).await;

    let page = facade.get_all_students_info(2, 0, "").await.unwrap();
    assert_eq!(page.iter().map(|v| v.id).collect::<Vec<_>>(), vec![5, 4]);

    let tail = facade.get_all_students_info(2, 4, "").await.unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].id, 1);

    let filtered = facade.get_all_students_info(10, 0, "car").await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Carol");

    assert_eq!(store.pages(), 3);
}

#[tokio::test]
async fn test_rename_of_glob_like_name_only_drops_its_own_search_entry() {
    let (facade, _store) = moka_facade();
    seed(&facade, &["Alice", "A*"]).await;
    facade.get_student_by_name("Alice").await.unwrap();
    facade.get_student_by_name("A*").await.unwrap();

    facade
        .update_student_info_by_id(&request("Zed"), 2)
        .await
        .unwrap();

    assert!(!facade.cache().list_exists("search_A*").await.unwrap());
    assert!(facade.cache().list_exists("search_Alice").await.unwrap());
}

/// Cache whose backend can never be reached
#[derive(Debug, Clone, Copy)]
struct UnreachableCache;

fn refused<T>() -> CacheResult<T> {
    Err(CacheError::ConnectionError("connection refused".to_string()))
}

impl BucketStore<StudentView> for UnreachableCache {
    async fn bucket_exists(&self, _key: &str) -> CacheResult<bool> {
        refused()
    }

    async fn get_bucket(&self, _key: &str) -> CacheResult<Option<StudentView>> {
        refused()
    }

    async fn save_bucket(&self, _key: &str, _value: &StudentView) -> CacheResult<()> {
        refused()
    }

    async fn delete_bucket(&self, _key: &str) -> CacheResult<bool> {
        refused()
    }
}

impl ListStore<StudentView> for UnreachableCache {
    async fn list_exists(&self, _key: &str) -> CacheResult<bool> {
        refused()
    }

    async fn get_list(&self, _key: &str) -> CacheResult<Vec<StudentView>> {
        refused()
    }

    async fn save_list(&self, _key: &str, _items: &[StudentView]) -> CacheResult<()> {
        refused()
    }

    async fn append_item(&self, _key: &str, _item: &StudentView) -> CacheResult<()> {
        refused()
    }

    async fn get_item(&self, _key: &str, _index: usize) -> CacheResult<Option<StudentView>> {
        refused()
    }

    async fn delete_item(&self, _key: &str, _index: usize) -> CacheResult<()> {
        refused()
    }
}

impl KeyPatternStore for UnreachableCache {
    async fn delete_keys_by_pattern(&self, _pattern: &str) -> CacheResult<u64> {
        refused()
    }
}

#[tokio::test]
async fn test_unreachable_cache_fails_reads_without_store_fallback() {
    let store = CountingStore::new();
    let facade = StudentFacade::new(StudentService::new(store.clone()), UnreachableCache);

    facade.add_student(&request("Alice")).await.unwrap();

    let err = facade.get_student_by_id(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
    assert!(matches!(err, StudentError::Cache(_)));

    let err = facade.get_student_by_name("Alice").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BackendUnavailable);

    assert_eq!(store.by_id(), 0);
    assert_eq!(store.by_name(), 0);
}
