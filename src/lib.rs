#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Student Records
//!
//! CRUD service for student records with a cache-aside facade.
//!
//! ## Architecture
//!
//! Requests flow in one direction:
//!
//! ```text
//! web -> facade -> (cache and/or services) -> database
//! ```
//!
//! The [`facade`] is the only layer that reasons about the cache. It keeps a
//! point entry per student (`student_<id>`) and a search entry per exact
//! name query (`search_<name>`), both written with one process-wide TTL.
//!
//! ## Module Organization
//!
//! - [`config`] - TOML configuration with environment substitution
//! - [`logging`] - tracing subscriber setup and structured log helpers
//! - [`errors`] - `StudentError` and its transport classification
//! - [`models`] - the persisted `Student` entity
//! - [`types`] - request payloads and the `StudentView` transfer shape
//! - [`validation`] - request validation returning field errors
//! - [`database`] - `StudentStore` with PostgreSQL and in-memory backends
//! - [`cache`] - Redis/Moka/NoOp backends and typed cache stores
//! - [`services`] - `StudentService`, the record service
//! - [`facade`] - `StudentFacade`, the cache-aside layer
//! - [`web`] - axum router, handlers and the response envelope
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use student_records::cache::{CacheProvider, TypedCache};
//! use student_records::database::InMemoryStudentStore;
//! use student_records::facade::StudentFacade;
//! use student_records::services::StudentService;
//! use student_records::types::StudentRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = StudentService::new(Arc::new(InMemoryStudentStore::new()));
//! let facade = StudentFacade::new(service, TypedCache::new(CacheProvider::noop()));
//!
//! let student = facade
//!     .add_student(&StudentRequest {
//!         name: "Alice".to_string(),
//!         age: "14".to_string(),
//!         student_class: "9B".to_string(),
//!         phone_number: 5_551_234_567,
//!     })
//!     .await?;
//!
//! let view = facade.get_student_by_id(student.id).await?;
//! assert_eq!(view.name, "Alice");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod database;
pub mod errors;
pub mod facade;
pub mod logging;
pub mod models;
pub mod services;
pub mod types;
pub mod validation;
pub mod web;

pub use errors::{ErrorKind, FieldError, StudentError, StudentResult};
pub use facade::StudentFacade;
pub use models::Student;
pub use types::{StudentRequest, StudentView};
