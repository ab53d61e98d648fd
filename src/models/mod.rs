//! # Models
//!
//! Persistent entities as stored by the record store.

pub mod student;

pub use student::Student;
