//! Wire and transfer types

pub mod student;

pub use student::{StudentPayload, StudentRequest, StudentView};
